//!
//! The deploy address predictor.
//!

use crate::error::Error;
use crate::factory::FactoryDescriptor;
use crate::network::Network;
use crate::salt::Salt;
use crate::utils::BYTE_LENGTH_FIELD;

///
/// The deploy address predictor.
///
/// The CREATE3 address depends only on the factory, the caller and the salt,
/// never on the deployed bytecode.
///
#[derive(Debug, Clone, Copy)]
pub struct AddressPredictor;

impl AddressPredictor {
    /// The CREATE2 prefix byte.
    const CREATE2_PREFIX: u8 = 0xff;

    /// The intermediate proxy init code deployed with CREATE2 by CREATE3 factories.
    pub const PROXY_INIT_CODE: &'static str = "67363d3d37363d34f03d5260086018f3";

    /// The nonce the intermediate proxy uses to deploy the target contract.
    const PROXY_DEPLOY_NONCE: u64 = 1;
}

impl AddressPredictor {
    ///
    /// Predicts the address the factory will deploy the `init_bytecode` to.
    ///
    /// The native factory is computed locally. The others are asked with one read-only call.
    ///
    pub async fn predict<N>(
        network: &N,
        descriptor: &FactoryDescriptor,
        deployer: web3::types::Address,
        salt: &Salt,
        init_bytecode: &[u8],
    ) -> Result<web3::types::Address, Error>
    where
        N: Network + ?Sized,
    {
        match descriptor
            .factory
            .prediction_calldata(deployer, salt, init_bytecode)
        {
            None => Ok(Self::create3_address(
                &descriptor.address,
                &deployer,
                salt,
            )),
            Some(calldata) => {
                let return_data = network.call(descriptor.address, calldata).await?;
                descriptor.factory.decode_prediction(return_data.as_slice())
            }
        }
    }

    ///
    /// Computes the CREATE3 address of a contract deployed via the native factory.
    ///
    /// The factory namespaces the salt by the caller, deploys the proxy with CREATE2,
    /// and the proxy deploys the contract with CREATE at nonce 1.
    ///
    pub fn create3_address(
        factory: &web3::types::Address,
        deployer: &web3::types::Address,
        salt: &Salt,
    ) -> web3::types::Address {
        let mut guarded_salt = Vec::with_capacity(
            crate::utils::BYTE_LENGTH_ETH_ADDRESS + BYTE_LENGTH_FIELD,
        );
        guarded_salt.extend(deployer.as_bytes());
        guarded_salt.extend(salt.as_bytes());
        let guarded_salt = web3::signing::keccak256(guarded_salt.as_slice());

        let proxy = Self::create2_address(factory, &guarded_salt, &Self::proxy_init_code_hash());
        Self::create_address(&proxy, Self::PROXY_DEPLOY_NONCE)
    }

    ///
    /// Computes the CREATE2 address.
    ///
    pub fn create2_address(
        deployer: &web3::types::Address,
        salt: &[u8; BYTE_LENGTH_FIELD],
        init_code_hash: &[u8; BYTE_LENGTH_FIELD],
    ) -> web3::types::Address {
        let mut bytes = Vec::with_capacity(
            1 + crate::utils::BYTE_LENGTH_ETH_ADDRESS + 2 * BYTE_LENGTH_FIELD,
        );
        bytes.push(Self::CREATE2_PREFIX);
        bytes.extend(deployer.as_bytes());
        bytes.extend(salt);
        bytes.extend(init_code_hash);

        crate::utils::hash_to_address(&web3::signing::keccak256(bytes.as_slice()))
    }

    ///
    /// Computes the CREATE address of the `nonce`-th contract deployed by `sender`.
    ///
    pub fn create_address(sender: &web3::types::Address, nonce: u64) -> web3::types::Address {
        let mut stream = rlp::RlpStream::new_list(2);
        stream.append(&sender.as_bytes().to_vec());
        stream.append(&nonce);

        crate::utils::hash_to_address(&web3::signing::keccak256(&stream.out()))
    }

    ///
    /// Returns the `keccak256` hash of the intermediate proxy init code.
    ///
    pub fn proxy_init_code_hash() -> [u8; BYTE_LENGTH_FIELD] {
        let init_code = hex::decode(Self::PROXY_INIT_CODE).expect("Always valid");
        web3::signing::keccak256(init_code.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::factory::Factory;
    use crate::network::mock::MockNetwork;
    use crate::salt::Salt;

    use super::AddressPredictor;

    fn address(value: &str) -> web3::types::Address {
        web3::types::Address::from_str(value).expect("Invalid address")
    }

    #[test]
    fn proxy_init_code_hash() {
        assert_eq!(
            hex::encode(AddressPredictor::proxy_init_code_hash()),
            "21c35dbe1b344a2488cf3321d6ce542f8e9f305544ff09e4993a62319a497c1f"
        );
    }

    #[test]
    fn create_address() {
        let sender = address("6ac7ea33f8831ea9dcc53393aaa88b25a785dbf0");
        assert_eq!(
            AddressPredictor::create_address(&sender, 0),
            address("cd234a471b72ba2f1ccf0a70fcaba648a5eecd8d")
        );
        assert_eq!(
            AddressPredictor::create_address(&sender, 1),
            address("343c43a37d37dff08ae8c4a11544c718abb4fcf8")
        );
    }

    #[test]
    fn create2_address() {
        let init_code_hash = web3::signing::keccak256(&[0x00]);
        assert_eq!(
            AddressPredictor::create2_address(
                &web3::types::Address::zero(),
                &[0u8; 32],
                &init_code_hash
            ),
            address("4d1a2e2bb4f88f0250f26ffff098b0b30b26bf38")
        );
    }

    #[test]
    fn create3_deterministic() {
        let factory = Factory::SkybitLite.default_address();
        let deployer = address("eb2e452fc167b5bb948c6fc2c9215ce7f4064692");
        let salt = Salt::from_str("TokenX").expect("Invalid salt");

        assert_eq!(
            AddressPredictor::create3_address(&factory, &deployer, &salt),
            AddressPredictor::create3_address(&factory, &deployer, &salt),
        );
    }

    #[test]
    fn create3_deployer_sensitive() {
        let factory = Factory::SkybitLite.default_address();
        let salt = Salt::from_str("TokenX").expect("Invalid salt");

        let first = address("eb2e452fc167b5bb948c6fc2c9215ce7f4064692");
        let second = address("6ac7ea33f8831ea9dcc53393aaa88b25a785dbf0");

        assert_ne!(
            AddressPredictor::create3_address(&factory, &first, &salt),
            AddressPredictor::create3_address(&factory, &second, &salt),
        );
    }

    #[tokio::test]
    async fn native_bytecode_independent() {
        let network = MockNetwork::new();
        let descriptor = Factory::SkybitLite.descriptor(None);
        let deployer = address("eb2e452fc167b5bb948c6fc2c9215ce7f4064692");
        let salt = Salt::from_str("TokenX").expect("Invalid salt");

        let first = AddressPredictor::predict(&network, &descriptor, deployer, &salt, &[0x60, 0x80])
            .await
            .expect("Prediction failed");
        let second = AddressPredictor::predict(
            &network,
            &descriptor,
            deployer,
            &salt,
            &[0xde, 0xad, 0xbe, 0xef],
        )
        .await
        .expect("Prediction failed");

        assert_eq!(first, second);
        assert_eq!(network.calls(), 0);
    }

    #[tokio::test]
    async fn native_salt_sensitive() {
        let network = MockNetwork::new();
        let descriptor = Factory::SkybitLite.descriptor(None);
        let deployer = address("eb2e452fc167b5bb948c6fc2c9215ce7f4064692");
        let bytecode = [0x60, 0x80, 0x60, 0x40];

        let first = AddressPredictor::predict(
            &network,
            &descriptor,
            deployer,
            &Salt::from_str("S1").expect("Invalid salt"),
            &bytecode,
        )
        .await
        .expect("Prediction failed");
        let second = AddressPredictor::predict(
            &network,
            &descriptor,
            deployer,
            &Salt::from_str("S2").expect("Invalid salt"),
            &bytecode,
        )
        .await
        .expect("Prediction failed");

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn abi_factory_queries_network() {
        let predicted = address("00000000000000000000000000000000000000aa");
        let network = MockNetwork::new().with_predicted_address(predicted);
        let deployer = address("eb2e452fc167b5bb948c6fc2c9215ce7f4064692");
        let salt = Salt::from_str("TokenX").expect("Invalid salt");

        for factory in [Factory::SkybitSolady, Factory::ZeframLou, Factory::Axelar] {
            let descriptor = factory.descriptor(None);
            let address = AddressPredictor::predict(&network, &descriptor, deployer, &salt, &[0x60])
                .await
                .expect("Prediction failed");
            assert_eq!(address, predicted);
        }
        assert_eq!(network.calls(), 3);
    }
}
