//! Aromaticity perception for molecular graphs.
//!
//! An [`Aromaticity`] engine pairs an [`ElectronDonation`] model, which
//! scores the pi electrons each ring atom contributes, with a
//! [`RingSource`] of candidate rings. A ring whose contributions are all
//! defined and sum to `4n + 2` is aromatic; every bond and atom on at least
//! one such ring is reported, or flagged by [`Aromaticity::apply`]. In
//! azulene the ten-atom perimeter qualifies but the fusion bond lies on no
//! aromatic ring.
//!
//! ```
//! use aromacrab::{from_smiles, Aromaticity, Cycles, ElectronDonation};
//!
//! let mut azulene = from_smiles("C1=CC2=CC=CC=CC2=C1").unwrap();
//! let engine = Aromaticity::new(ElectronDonation::Daylight, Cycles::all());
//! assert!(engine.apply(&mut azulene).unwrap());
//! let flagged = azulene.bonds().filter(|&b| azulene.bond(b).is_aromatic).count();
//! assert_eq!(flagged, 10);
//! ```

pub mod aromaticity;
pub mod atom;
pub mod bond;
pub mod config;
pub mod cycles;
pub mod donation;
pub mod element;
pub mod error;
pub mod hybridization;
pub mod kekulize;
pub mod mol;
pub mod rings;
pub mod smiles;
pub mod traits;
pub mod valence;
pub mod wrappers;

pub use aromaticity::{electron_sum, valid_sum, Aromaticity};
pub use atom::Atom;
pub use bond::{Bond, BondOrder};
pub use config::AromaticityConfig;
pub use cycles::{cyclic_bonds, Cycles, Ring, RingSource, DEFAULT_CYCLE_LIMIT};
pub use donation::{Contribution, DonationContext, ElectronDonation};
pub use element::Element;
pub use error::{AromaticityError, ConfigError};
pub use hybridization::perceive_hybridization;
pub use kekulize::{kekulize, KekulizeError};
pub use mol::Mol;
pub use rings::RingInfo;
pub use smiles::{from_smiles, parse_smiles, SmilesError};
pub use traits::{
    HasAromaticity, HasAtomicNum, HasBondOrder, HasFormalCharge, HasHybridization,
    HasHydrogenCount, SetAromaticity,
};
pub use wrappers::{Hybridization, WithHybridization};
