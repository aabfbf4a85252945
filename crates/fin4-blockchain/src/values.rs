use alloy::{
    dyn_abi::DynSolValue,
    primitives::{Address, B256, U256},
};

/// Failure to read a decoded output value as the expected host type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("{method}: output {index} is missing")]
    Missing { method: String, index: usize },

    #[error("{method}: output {index} is not {expected}")]
    UnexpectedType {
        method: String,
        index: usize,
        expected: &'static str,
    },

    #[error("{method}: output {index} does not fit into {target}: {value}")]
    Overflow {
        method: String,
        index: usize,
        target: &'static str,
        value: U256,
    },
}

/// Decoded outputs of one contract read, accessed by position.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    method: String,
    values: Vec<DynSolValue>,
}

impl OutputRow {
    pub fn new(method: impl Into<String>, values: Vec<DynSolValue>) -> Self {
        Self {
            method: method.into(),
            values,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[DynSolValue] {
        &self.values
    }

    pub fn into_values(self) -> Vec<DynSolValue> {
        self.values
    }

    fn get(&self, index: usize) -> Result<&DynSolValue, ValueError> {
        self.values.get(index).ok_or_else(|| ValueError::Missing {
            method: self.method.clone(),
            index,
        })
    }

    fn unexpected(&self, index: usize, expected: &'static str) -> ValueError {
        ValueError::UnexpectedType {
            method: self.method.clone(),
            index,
            expected,
        }
    }

    fn list(&self, index: usize) -> Result<&[DynSolValue], ValueError> {
        match self.get(index)? {
            DynSolValue::Array(items) | DynSolValue::FixedArray(items) => Ok(items),
            _ => Err(self.unexpected(index, "an array")),
        }
    }

    pub fn address(&self, index: usize) -> Result<Address, ValueError> {
        self.get(index)?
            .as_address()
            .ok_or_else(|| self.unexpected(index, "an address"))
    }

    pub fn bool(&self, index: usize) -> Result<bool, ValueError> {
        self.get(index)?
            .as_bool()
            .ok_or_else(|| self.unexpected(index, "a bool"))
    }

    pub fn string(&self, index: usize) -> Result<String, ValueError> {
        self.get(index)?
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| self.unexpected(index, "a string"))
    }

    pub fn uint(&self, index: usize) -> Result<U256, ValueError> {
        self.get(index)?
            .as_uint()
            .map(|(value, _)| value)
            .ok_or_else(|| self.unexpected(index, "an unsigned integer"))
    }

    pub fn u64(&self, index: usize) -> Result<u64, ValueError> {
        let value = self.uint(index)?;
        self.narrow(index, value, "u64")
    }

    pub fn u128(&self, index: usize) -> Result<u128, ValueError> {
        let value = self.uint(index)?;
        self.narrow(index, value, "u128")
    }

    pub fn bytes32(&self, index: usize) -> Result<B256, ValueError> {
        match self.get(index)? {
            DynSolValue::FixedBytes(word, 32) => Ok(*word),
            _ => Err(self.unexpected(index, "bytes32")),
        }
    }

    /// Text that the contract may publish either as `string` or as `bytes32`.
    pub fn text(&self, index: usize) -> Result<String, ValueError> {
        match self.get(index)? {
            DynSolValue::String(s) => Ok(s.clone()),
            DynSolValue::FixedBytes(word, 32) => Ok(bytes32_to_string(word)),
            DynSolValue::Bytes(raw) => Ok(alloy::hex::encode_prefixed(raw)),
            _ => Err(self.unexpected(index, "text")),
        }
    }

    pub fn addresses(&self, index: usize) -> Result<Vec<Address>, ValueError> {
        self.list(index)?
            .iter()
            .map(|item| item.as_address().ok_or_else(|| self.unexpected(index, "an address[]")))
            .collect()
    }

    pub fn uints(&self, index: usize) -> Result<Vec<U256>, ValueError> {
        self.list(index)?
            .iter()
            .map(|item| {
                item.as_uint()
                    .map(|(value, _)| value)
                    .ok_or_else(|| self.unexpected(index, "a uint[]"))
            })
            .collect()
    }

    pub fn u64s(&self, index: usize) -> Result<Vec<u64>, ValueError> {
        self.uints(index)?
            .into_iter()
            .map(|value| self.narrow(index, value, "u64"))
            .collect()
    }

    pub fn u128s(&self, index: usize) -> Result<Vec<u128>, ValueError> {
        self.uints(index)?
            .into_iter()
            .map(|value| self.narrow(index, value, "u128"))
            .collect()
    }

    pub fn bytes32_list(&self, index: usize) -> Result<Vec<B256>, ValueError> {
        self.list(index)?
            .iter()
            .map(|item| match item {
                DynSolValue::FixedBytes(word, 32) => Ok(*word),
                _ => Err(self.unexpected(index, "a bytes32[]")),
            })
            .collect()
    }

    pub fn text_list(&self, index: usize) -> Result<Vec<String>, ValueError> {
        self.list(index)?
            .iter()
            .map(|item| match item {
                DynSolValue::String(s) => Ok(s.clone()),
                DynSolValue::FixedBytes(word, 32) => Ok(bytes32_to_string(word)),
                _ => Err(self.unexpected(index, "a string[]")),
            })
            .collect()
    }

    fn narrow<T>(&self, index: usize, value: U256, target: &'static str) -> Result<T, ValueError>
    where
        T: TryFrom<U256>,
    {
        T::try_from(value).map_err(|_| ValueError::Overflow {
            method: self.method.clone(),
            index,
            target,
            value,
        })
    }
}

/// Decodes a right-padded `bytes32` into text, dropping trailing NUL bytes.
pub fn bytes32_to_string(word: &B256) -> String {
    let end = word
        .iter()
        .rposition(|byte| *byte != 0)
        .map_or(0, |last| last + 1);
    String::from_utf8_lossy(&word[..end]).into_owned()
}

/// `uint256` argument value.
pub fn uint(value: u64) -> DynSolValue {
    DynSolValue::Uint(U256::from(value), 256)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: Vec<DynSolValue>) -> OutputRow {
        OutputRow::new("getTokenInfo", values)
    }

    #[test]
    fn reads_values_by_position() {
        let token = Address::repeat_byte(0x11);
        let row = row(vec![
            DynSolValue::Bool(true),
            DynSolValue::String("Fin4 Token".into()),
            uint(42),
            DynSolValue::Array(vec![DynSolValue::Address(token)]),
        ]);

        assert!(row.bool(0).unwrap());
        assert_eq!(row.string(1).unwrap(), "Fin4 Token");
        assert_eq!(row.u64(2).unwrap(), 42);
        assert_eq!(row.addresses(3).unwrap(), vec![token]);
    }

    #[test]
    fn oversized_uint_is_an_overflow_not_a_truncation() {
        let row = row(vec![DynSolValue::Uint(U256::from(u64::MAX) + U256::from(1), 256)]);

        assert!(matches!(
            row.u64(0),
            Err(ValueError::Overflow { target: "u64", index: 0, .. })
        ));
        assert_eq!(row.u128(0).unwrap(), u64::MAX as u128 + 1);
    }

    #[test]
    fn missing_and_mistyped_outputs_are_reported() {
        let row = row(vec![DynSolValue::Bool(false)]);

        assert!(matches!(row.string(0), Err(ValueError::UnexpectedType { .. })));
        assert!(matches!(row.bool(1), Err(ValueError::Missing { index: 1, .. })));
    }

    #[test]
    fn bytes32_text_is_trimmed_at_trailing_zeroes() {
        let mut word = [0u8; 32];
        word[..4].copy_from_slice(b"Gold");
        let word = B256::from(word);

        assert_eq!(bytes32_to_string(&word), "Gold");
        assert_eq!(bytes32_to_string(&B256::ZERO), "");

        let row = row(vec![DynSolValue::Array(vec![DynSolValue::FixedBytes(word, 32)])]);
        assert_eq!(row.text_list(0).unwrap(), vec!["Gold".to_string()]);
    }
}
