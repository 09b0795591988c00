//! Stable bincode/serde representations for the byte types.
//!
//! - `BytesValue`: bincode: length-prefixed bytes; serde: `0x`-prefixed hex string.
//! - `Bytes32`: bincode: 32 raw bytes, no prefix; serde: `0x`-prefixed hex string.
//!
//! Structures that embed these types (e.g. discovery peers) can derive
//! `bincode::Encode`/`Decode` and `serde` traits directly.
use crate::bytes_value::{BytesValue, BytesView};
use crate::bytes32::Bytes32;
use bincode::enc::Encoder;
use bincode::error::EncodeError;
use serde::de::Visitor;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Formatter;

impl bincode::Encode for BytesValue {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), EncodeError> {
        bincode::Encode::encode(self.as_slice(), encoder)
    }
}

impl<__Context> bincode::Decode<__Context> for BytesValue {
    fn decode<__D: bincode::de::Decoder<Context = __Context>>(
        decoder: &mut __D,
    ) -> Result<Self, bincode::error::DecodeError> {
        let bytes: Vec<u8> = bincode::Decode::decode(decoder)?;
        Ok(BytesValue::wrap(bytes))
    }
}

impl<'__de, __Context> ::bincode::BorrowDecode<'__de, __Context> for BytesValue {
    fn borrow_decode<__D: ::bincode::de::BorrowDecoder<'__de, Context = __Context>>(
        decoder: &mut __D,
    ) -> Result<Self, ::bincode::error::DecodeError> {
        let bytes: Vec<u8> = bincode::BorrowDecode::<'_, __Context>::borrow_decode(decoder)?;
        Ok(BytesValue::wrap(bytes))
    }
}

impl bincode::Encode for Bytes32 {
    fn encode<E: Encoder>(&self, encoder: &mut E) -> Result<(), EncodeError> {
        bincode::Encode::encode(&self.to_array(), encoder)
    }
}

impl<__Context> bincode::Decode<__Context> for Bytes32 {
    fn decode<__D: bincode::de::Decoder<Context = __Context>>(
        decoder: &mut __D,
    ) -> Result<Self, bincode::error::DecodeError> {
        let array: [u8; Bytes32::SIZE] = bincode::Decode::decode(decoder)?;
        Ok(Bytes32::new(array))
    }
}

impl<'__de, __Context> ::bincode::BorrowDecode<'__de, __Context> for Bytes32 {
    fn borrow_decode<__D: ::bincode::de::BorrowDecoder<'__de, Context = __Context>>(
        decoder: &mut __D,
    ) -> Result<Self, ::bincode::error::DecodeError> {
        let array: [u8; Bytes32::SIZE] =
            bincode::BorrowDecode::<'_, __Context>::borrow_decode(decoder)?;
        Ok(Bytes32::new(array))
    }
}

impl Serialize for BytesValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.to_hex_string().as_str())
    }
}

struct BytesValueVisitor;

impl<'de> Visitor<'de> for BytesValueVisitor {
    type Value = BytesValue;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a hex string with an even number of digits")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        BytesValue::from_hex_string(v).map_err(|e| serde::de::Error::custom(e.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        self.visit_str(&v)
    }
}

impl<'de> Deserialize<'de> for BytesValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_string(BytesValueVisitor)
    }
}

impl Serialize for Bytes32 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.to_hex_string().as_str())
    }
}

struct Bytes32Visitor;

impl<'de> Visitor<'de> for Bytes32Visitor {
    type Value = Bytes32;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a hex string of at most 32 bytes")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Bytes32::from_hex_string(v).map_err(|e| serde::de::Error::custom(e.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        self.visit_str(&v)
    }
}

impl<'de> Deserialize<'de> for Bytes32 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_string(Bytes32Visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn encode<T: bincode::Encode>(value: &T) -> Result<Vec<u8>, CoreError> {
        Ok(bincode::encode_to_vec(value, bincode::config::standard())?)
    }

    fn decode<T: bincode::Decode<()>>(bytes: &[u8]) -> Result<T, CoreError> {
        let (value, _) = bincode::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(value)
    }

    #[test]
    fn bincode_bytes_value_is_length_prefixed() {
        let value = BytesValue::of(&[0xde, 0xad, 0xbe, 0xef]);
        let encoded = encode(&value).unwrap();
        assert_eq!(encoded, vec![4, 0xde, 0xad, 0xbe, 0xef]);
        let decoded: BytesValue = decode(&encoded).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn bincode_bytes32_has_no_prefix() {
        let value = Bytes32::from_hex_string("0xff").unwrap();
        let encoded = encode(&value).unwrap();
        assert_eq!(encoded.len(), Bytes32::SIZE);
        let decoded: Bytes32 = decode(&encoded).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn truncated_input_is_a_decode_error() {
        let error = decode::<Bytes32>(&[0; 8]).unwrap_err();
        assert_eq!(error.kind(), crate::error::CoreErrorKind::EncodeDecodeError);
    }

    #[test]
    fn serde_uses_hex_strings() {
        let value = BytesValue::of(&[0x01, 0xab]);
        assert_eq!(serde_json::to_string(&value).unwrap(), "\"0x01ab\"");
        let parsed: BytesValue = serde_json::from_str("\"0x01ab\"").unwrap();
        assert_eq!(parsed, value);
        assert!(serde_json::from_str::<BytesValue>("\"0x1ab\"").is_err());

        let key: Bytes32 = serde_json::from_str("\"0x01\"").unwrap();
        assert_eq!(key.get(31).unwrap(), 1);
        assert_eq!(
            serde_json::to_string(&key).unwrap(),
            format!("\"0x{}01\"", "00".repeat(31))
        );
    }
}
