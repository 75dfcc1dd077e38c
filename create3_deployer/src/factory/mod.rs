//!
//! The CREATE3 factories.
//!

pub mod calling_convention;
pub mod descriptor;
pub mod submission;

use std::str::FromStr;

use crate::error::Error;
use crate::network::receipt::ReceiptLog;
use crate::salt::Salt;

use self::calling_convention::CallingConvention;
pub use self::descriptor::FactoryDescriptor;
use self::submission::Submission;

///
/// The supported CREATE3 factory.
///
/// The factory contracts are deployed externally and never change, so the set is closed.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Factory {
    /// The SKYBIT Yul factory with the raw transaction interface. The default one.
    SkybitLite,
    /// The SKYBIT factory built on Solady's CREATE3 library.
    SkybitSolady,
    /// The ZeframLou CREATE3 factory.
    ZeframLou,
    /// The Axelar network `Create3Deployer`.
    Axelar,
}

impl Factory {
    /// All the supported factories.
    pub const ALL: [Self; 4] = [
        Self::SkybitLite,
        Self::SkybitSolady,
        Self::ZeframLou,
        Self::Axelar,
    ];

    /// The salt-first deploy method signature.
    pub const DEPLOY_SALT_FIRST_SIGNATURE: &'static str = "deploy(bytes32,bytes)";
    /// The bytecode-first deploy method signature.
    pub const DEPLOY_BYTECODE_FIRST_SIGNATURE: &'static str = "deploy(bytes,bytes32)";
    /// The salt-first prediction method signature.
    pub const GET_DEPLOYED_SIGNATURE: &'static str = "getDeployed(address,bytes32)";
    /// The bytecode-first prediction method signature.
    pub const DEPLOYED_ADDRESS_SIGNATURE: &'static str = "deployedAddress(bytes,address,bytes32)";
    /// The event emitted by the Axelar factory on each deployment.
    pub const AXELAR_DEPLOYED_EVENT_SIGNATURE: &'static str = "Deployed(bytes32,bytes32,address)";
}

impl Factory {
    ///
    /// Returns the name the factory is selected by.
    ///
    pub fn name(&self) -> &'static str {
        match self {
            Self::SkybitLite => "SKYBITLite",
            Self::SkybitSolady => "SKYBITSolady",
            Self::ZeframLou => "ZeframLou",
            Self::Axelar => "axelarnetwork",
        }
    }

    ///
    /// Returns the address the factory is known to be deployed at.
    ///
    pub fn default_address(&self) -> web3::types::Address {
        let address = match self {
            Self::SkybitLite => "D74C916B09cB7466C8AcF11231610326EC5041DE",
            Self::SkybitSolady => "7008e1DEECA3E45E61b379BBA882134b3A15d9dF",
            Self::ZeframLou => "92B9db5453E03E516Fd461a1852E67EAF8Bc6dad",
            Self::Axelar => "f0d5258610A5eF4ac7b894DDaAD1c314De8d56a5",
        };
        web3::types::Address::from_str(address).expect("Always valid")
    }

    ///
    /// Returns the factory calling convention.
    ///
    pub fn calling_convention(&self) -> CallingConvention {
        match self {
            Self::SkybitLite => CallingConvention::RawSaltPrefix,
            Self::SkybitSolady | Self::ZeframLou => CallingConvention::SaltFirst,
            Self::Axelar => CallingConvention::BytecodeFirst,
        }
    }

    ///
    /// Returns the descriptor at the `address`, or at the well-known address if unset.
    ///
    pub fn descriptor(&self, address: Option<web3::types::Address>) -> FactoryDescriptor {
        FactoryDescriptor::new(*self, address.unwrap_or_else(|| self.default_address()))
    }

    ///
    /// Returns the calldata of the read-only prediction call.
    ///
    /// Returns `None` if the address is computed locally.
    ///
    pub fn prediction_calldata(
        &self,
        deployer: web3::types::Address,
        salt: &Salt,
        init_bytecode: &[u8],
    ) -> Option<Vec<u8>> {
        match self.calling_convention() {
            CallingConvention::RawSaltPrefix => None,
            CallingConvention::SaltFirst => Some(Self::abi_call(
                Self::GET_DEPLOYED_SIGNATURE,
                &[
                    web3::ethabi::Token::Address(deployer),
                    web3::ethabi::Token::FixedBytes(salt.as_bytes().to_vec()),
                ],
            )),
            CallingConvention::BytecodeFirst => Some(Self::abi_call(
                Self::DEPLOYED_ADDRESS_SIGNATURE,
                &[
                    web3::ethabi::Token::Bytes(init_bytecode.to_vec()),
                    web3::ethabi::Token::Address(deployer),
                    web3::ethabi::Token::FixedBytes(salt.as_bytes().to_vec()),
                ],
            )),
        }
    }

    ///
    /// Decodes the address returned by the prediction call.
    ///
    pub fn decode_prediction(&self, return_data: &[u8]) -> Result<web3::types::Address, Error> {
        let mut tokens = web3::ethabi::decode(&[web3::ethabi::ParamType::Address], return_data)
            .map_err(|error| {
                Error::transient(
                    "eth_call",
                    format!("{self} returned an invalid predicted address: {error}"),
                )
            })?;
        match tokens.pop() {
            Some(web3::ethabi::Token::Address(address)) => Ok(address),
            _ => Err(Error::transient(
                "eth_call",
                format!("{self} returned no predicted address"),
            )),
        }
    }

    ///
    /// Shapes the gas estimation call.
    ///
    pub fn estimation_call(
        &self,
        factory_address: web3::types::Address,
        deployer: web3::types::Address,
        salt: &Salt,
        init_bytecode: &[u8],
    ) -> Submission {
        self.build_submission(factory_address, deployer, salt, init_bytecode, None)
    }

    ///
    /// Shapes the deployment transaction.
    ///
    pub fn build_submission(
        &self,
        factory_address: web3::types::Address,
        deployer: web3::types::Address,
        salt: &Salt,
        init_bytecode: &[u8],
        gas: Option<web3::types::U256>,
    ) -> Submission {
        let data = match self.calling_convention() {
            CallingConvention::RawSaltPrefix => {
                let mut data = Vec::with_capacity(salt.as_bytes().len() + init_bytecode.len());
                data.extend(salt.as_bytes());
                data.extend(init_bytecode);
                data
            }
            CallingConvention::SaltFirst => Self::abi_call(
                Self::DEPLOY_SALT_FIRST_SIGNATURE,
                &[
                    web3::ethabi::Token::FixedBytes(salt.as_bytes().to_vec()),
                    web3::ethabi::Token::Bytes(init_bytecode.to_vec()),
                ],
            ),
            CallingConvention::BytecodeFirst => Self::abi_call(
                Self::DEPLOY_BYTECODE_FIRST_SIGNATURE,
                &[
                    web3::ethabi::Token::Bytes(init_bytecode.to_vec()),
                    web3::ethabi::Token::FixedBytes(salt.as_bytes().to_vec()),
                ],
            ),
        };

        Submission::new(deployer, factory_address, data).with_gas(gas)
    }

    ///
    /// Extracts the deployed address from the factory events, if the factory emits any.
    ///
    pub fn deployed_address_from_logs(
        &self,
        factory_address: web3::types::Address,
        logs: &[ReceiptLog],
    ) -> Option<web3::types::Address> {
        match self {
            Self::SkybitLite | Self::SkybitSolady | Self::ZeframLou => None,
            Self::Axelar => {
                let topic = web3::types::H256(web3::signing::keccak256(
                    Self::AXELAR_DEPLOYED_EVENT_SIGNATURE.as_bytes(),
                ));
                logs.iter()
                    .filter(|log| log.address == factory_address)
                    .find(|log| log.topics.len() == 4 && log.topics[0] == topic)
                    .map(|log| crate::utils::hash_to_address(&log.topics[3].0))
            }
        }
    }

    ///
    /// Encodes a method call with its selector.
    ///
    fn abi_call(signature: &str, tokens: &[web3::ethabi::Token]) -> Vec<u8> {
        let mut calldata = crate::utils::selector(signature).to_vec();
        calldata.extend(web3::ethabi::encode(tokens));
        calldata
    }
}

impl FromStr for Factory {
    type Err = Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "native" | "SKYBITLite" => Ok(Self::SkybitLite),
            "SKYBITSolady" => Ok(Self::SkybitSolady),
            "ZeframLou" => Ok(Self::ZeframLou),
            "axelarnetwork" => Ok(Self::Axelar),
            string => Err(Error::configuration(format!(
                "Unknown factory `{}`. Supported factories: {:?}",
                string,
                Self::ALL.map(|factory| factory.name())
            ))),
        }
    }
}

impl std::fmt::Display for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::error::Error;
    use crate::factory::calling_convention::CallingConvention;
    use crate::network::receipt::ReceiptLog;
    use crate::salt::Salt;

    use super::Factory;

    fn salt() -> Salt {
        Salt::from_str("TokenX").expect("Invalid salt")
    }

    #[test]
    fn names() {
        for factory in Factory::ALL {
            assert_eq!(Factory::from_str(factory.name()).expect("Always valid"), factory);
        }
        assert_eq!(Factory::from_str("native").expect("Always valid"), Factory::SkybitLite);
    }

    #[test]
    fn error_unknown_factory() {
        assert!(matches!(
            Factory::from_str("pcaversaccio"),
            Err(Error::Configuration(..))
        ));
    }

    #[test]
    fn raw_submission_is_salt_prefixed() {
        let factory = Factory::SkybitLite;
        let deployer = web3::types::Address::repeat_byte(0x11);
        let bytecode = vec![0x60, 0x80, 0x60, 0x40];

        let submission =
            factory.build_submission(factory.default_address(), deployer, &salt(), &bytecode, None);

        assert_eq!(submission.to, factory.default_address());
        assert_eq!(submission.from, deployer);
        assert_eq!(&submission.data[..32], salt().as_bytes());
        assert_eq!(&submission.data[32..], bytecode.as_slice());
        assert_eq!(factory.calling_convention(), CallingConvention::RawSaltPrefix);
        assert!(factory
            .prediction_calldata(deployer, &salt(), &bytecode)
            .is_none());
    }

    #[test]
    fn salt_first_submission() {
        let deployer = web3::types::Address::repeat_byte(0x11);
        let bytecode = vec![0x60, 0x80];

        for factory in [Factory::SkybitSolady, Factory::ZeframLou] {
            let submission = factory.build_submission(
                factory.default_address(),
                deployer,
                &salt(),
                &bytecode,
                None,
            );
            assert_eq!(&submission.data[..4], &crate::utils::selector("deploy(bytes32,bytes)"));
            assert_eq!(&submission.data[4..36], salt().as_bytes());

            let tokens = web3::ethabi::decode(
                &[
                    web3::ethabi::ParamType::FixedBytes(32),
                    web3::ethabi::ParamType::Bytes,
                ],
                &submission.data[4..],
            )
            .expect("Always valid");
            assert_eq!(tokens[1], web3::ethabi::Token::Bytes(bytecode.clone()));
        }
    }

    #[test]
    fn bytecode_first_submission() {
        let factory = Factory::Axelar;
        let deployer = web3::types::Address::repeat_byte(0x11);
        let bytecode = vec![0x60, 0x80];

        let submission =
            factory.build_submission(factory.default_address(), deployer, &salt(), &bytecode, None);
        assert_eq!(&submission.data[..4], &crate::utils::selector("deploy(bytes,bytes32)"));

        let tokens = web3::ethabi::decode(
            &[
                web3::ethabi::ParamType::Bytes,
                web3::ethabi::ParamType::FixedBytes(32),
            ],
            &submission.data[4..],
        )
        .expect("Always valid");
        assert_eq!(tokens[0], web3::ethabi::Token::Bytes(bytecode));
        assert_eq!(
            tokens[1],
            web3::ethabi::Token::FixedBytes(salt().as_bytes().to_vec())
        );
    }

    #[test]
    fn prediction_calldata() {
        let deployer = web3::types::Address::repeat_byte(0x11);

        let calldata = Factory::ZeframLou
            .prediction_calldata(deployer, &salt(), &[0x60])
            .expect("Always exists");
        assert_eq!(&calldata[..4], &crate::utils::selector("getDeployed(address,bytes32)"));

        let calldata = Factory::Axelar
            .prediction_calldata(deployer, &salt(), &[0x60])
            .expect("Always exists");
        assert_eq!(
            &calldata[..4],
            &crate::utils::selector("deployedAddress(bytes,address,bytes32)")
        );
    }

    #[test]
    fn decode_prediction() {
        let address = web3::types::Address::repeat_byte(0xaa);
        let return_data = web3::ethabi::encode(&[web3::ethabi::Token::Address(address)]);
        assert_eq!(
            Factory::ZeframLou
                .decode_prediction(return_data.as_slice())
                .expect("Always valid"),
            address
        );
        assert!(Factory::ZeframLou.decode_prediction(&[0x01]).is_err());
    }

    #[test]
    fn axelar_deployed_event() {
        let factory = Factory::Axelar;
        let deployed = web3::types::Address::repeat_byte(0xbb);
        let mut deployed_topic = [0u8; 32];
        deployed_topic[12..].copy_from_slice(deployed.as_bytes());

        let log = ReceiptLog {
            address: factory.default_address(),
            topics: vec![
                web3::types::H256(web3::signing::keccak256(
                    "Deployed(bytes32,bytes32,address)".as_bytes(),
                )),
                web3::types::H256::repeat_byte(0x01),
                web3::types::H256(*salt().as_bytes()),
                web3::types::H256(deployed_topic),
            ],
        };

        assert_eq!(
            factory.deployed_address_from_logs(factory.default_address(), &[log.clone()]),
            Some(deployed)
        );
        assert_eq!(
            Factory::ZeframLou.deployed_address_from_logs(factory.default_address(), &[log]),
            None
        );
    }
}
