use crate::traits::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Hybridization {
    S,
    SP,
    SP2,
    #[default]
    SP3,
    SP3D,
    SP3D2,
    Other,
}

/// An atom annotated with a perceived hybridization state.
///
/// Produced by [`perceive_hybridization`](crate::perceive_hybridization);
/// every other atom property is delegated to `inner`.
#[derive(Debug, Clone, PartialEq)]
pub struct WithHybridization<T> {
    pub inner: T,
    pub hybridization: Hybridization,
}

impl<T> HasHybridization for WithHybridization<T> {
    fn hybridization(&self) -> Option<Hybridization> {
        Some(self.hybridization)
    }
}

impl<T: SetAromaticity> SetAromaticity for WithHybridization<T> {
    fn set_aromatic(&mut self, aromatic: bool) {
        self.inner.set_aromatic(aromatic);
    }
}

macro_rules! delegate_trait {
    ($wrapper:ident, $trait:ident, $method:ident, $ret:ty) => {
        impl<T: $trait> $trait for $wrapper<T> {
            fn $method(&self) -> $ret {
                self.inner.$method()
            }
        }
    };
}

delegate_trait!(WithHybridization, HasAtomicNum, atomic_num, u8);
delegate_trait!(WithHybridization, HasFormalCharge, formal_charge, i8);
delegate_trait!(WithHybridization, HasHydrogenCount, hydrogen_count, u8);
delegate_trait!(WithHybridization, HasAromaticity, is_aromatic, bool);
