use serde::{Deserialize, Serialize};

use crate::cycles::Cycles;
use crate::donation::ElectronDonation;

/// Serializable choice of donation model and ring source.
///
/// Missing fields take their defaults, so `{}` is the classical model over
/// every simple cycle.
///
/// ```
/// use aromacrab::{AromaticityConfig, Cycles, ElectronDonation};
///
/// let config: AromaticityConfig =
///     serde_json::from_str(r#"{ "model": "daylight", "cycles": { "kind": "sssr" } }"#).unwrap();
/// assert_eq!(config.model, ElectronDonation::Daylight);
/// assert_eq!(config.cycles, Cycles::Sssr);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AromaticityConfig {
    pub model: ElectronDonation,
    pub cycles: Cycles,
}
