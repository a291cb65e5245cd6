//! [`PackValue`] — decoded MessagePack value tree.

/// A MessagePack value.
///
/// Maps keep their wire order, so a decoded map can be compared against the
/// exact insertion order of the builder that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum PackValue {
    Null,
    Bool(bool),
    Integer(i64),
    /// Only produced for values above `i64::MAX`.
    UInteger(u64),
    Float32(f32),
    Float(f64),
    Bytes(Vec<u8>),
    Str(String),
    Array(Vec<PackValue>),
    Object(Vec<(String, PackValue)>),
}

impl PackValue {
    /// Looks up a map entry by key.
    pub fn get(&self, key: &str) -> Option<&PackValue> {
        match self {
            PackValue::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Follows a dotted key path such as `access.canDelete`.
    pub fn path(&self, path: &str) -> Option<&PackValue> {
        path.split('.').try_fold(self, |value, key| value.get(key))
    }

    pub fn keys(&self) -> Vec<&str> {
        match self {
            PackValue::Object(entries) => entries.iter().map(|(k, _)| k.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PackValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PackValue::Integer(i) => Some(*i),
            PackValue::UInteger(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PackValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PackValue::Float(f) => Some(*f),
            PackValue::Float32(f) => Some(f64::from(*f)),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            PackValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[PackValue]> {
        match self {
            PackValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PackValue::Null)
    }
}

impl From<&str> for PackValue {
    fn from(s: &str) -> Self {
        PackValue::Str(s.to_owned())
    }
}

impl From<String> for PackValue {
    fn from(s: String) -> Self {
        PackValue::Str(s)
    }
}

impl From<i64> for PackValue {
    fn from(i: i64) -> Self {
        PackValue::Integer(i)
    }
}

impl From<bool> for PackValue {
    fn from(b: bool) -> Self {
        PackValue::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_walks_nested_objects() {
        let value = PackValue::Object(vec![(
            "access".to_owned(),
            PackValue::Object(vec![("canDelete".to_owned(), PackValue::Bool(true))]),
        )]);
        assert_eq!(value.path("access.canDelete"), Some(&PackValue::Bool(true)));
        assert_eq!(value.path("access.canLeave"), None);
        assert_eq!(value.keys(), vec!["access"]);
    }
}
