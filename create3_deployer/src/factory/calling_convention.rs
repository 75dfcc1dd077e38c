//!
//! The factory calling convention.
//!

///
/// The factory calling convention.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallingConvention {
    /// The salt is prepended to the init bytecode, and the result is sent to the factory as is.
    RawSaltPrefix,
    /// `deploy(bytes32 salt, bytes bytecode)`,
    /// predicted with `getDeployed(address deployer, bytes32 salt)`.
    SaltFirst,
    /// `deploy(bytes bytecode, bytes32 salt)`,
    /// predicted with `deployedAddress(bytes bytecode, address deployer, bytes32 salt)`.
    BytecodeFirst,
}

impl std::fmt::Display for CallingConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RawSaltPrefix => write!(f, "raw salt-prefixed transaction"),
            Self::SaltFirst => write!(f, "deploy(bytes32,bytes)"),
            Self::BytecodeFirst => write!(f, "deploy(bytes,bytes32)"),
        }
    }
}
