//!
//! The factory descriptor.
//!

use crate::factory::calling_convention::CallingConvention;
use crate::factory::Factory;

///
/// The factory selected for a deployment run.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryDescriptor {
    /// The factory variant.
    pub factory: Factory,
    /// The factory on-chain address.
    pub address: web3::types::Address,
    /// The factory calling convention.
    pub calling_convention: CallingConvention,
}

impl FactoryDescriptor {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(factory: Factory, address: web3::types::Address) -> Self {
        Self {
            factory,
            address,
            calling_convention: factory.calling_convention(),
        }
    }
}

impl std::fmt::Display for FactoryDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {} ({})",
            self.factory,
            crate::utils::address_to_checksum(&self.address),
            self.calling_convention
        )
    }
}
