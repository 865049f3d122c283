pub mod hex_quantity {
    use serde::{Deserialize, Deserializer};

    use crate::quantity::decode_quantity_u64;
    use crate::rpc::block::BlockNumber;

    pub fn deserialize_block_number<'de, D>(deserializer: D) -> Result<BlockNumber, D::Error>
    where
        D: Deserializer<'de>,
    {
        let buf = String::deserialize(deserializer)?;

        decode_quantity_u64("number", &buf).map_err(serde::de::Error::custom)
    }

}
