//! Serde utility helpers for case-insensitive deserialization

/// Macro to implement case-insensitive deserialization for unit enums.
///
/// Each variant may accept several spellings; the first one is the canonical
/// name reported in error messages.
///
/// Usage:
/// ```ignore
/// impl_case_insensitive_deserialize!(
///     OptionKind,
///     Boolean => ["boolean", "bool"],
///     String => ["string"],
/// );
/// ```
#[macro_export]
macro_rules! impl_case_insensitive_deserialize {
    ($enum_type:ty, $($variant:ident => [$($str_val:expr),+ $(,)?]),+ $(,)?) => {
        impl<'de> serde::Deserialize<'de> for $enum_type {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <::std::string::String as serde::Deserialize>::deserialize(deserializer)?;
                let lower = s.to_lowercase();
                $(
                    if [$($str_val),+].contains(&lower.as_str()) {
                        return ::std::result::Result::Ok(Self::$variant);
                    }
                )+
                let expected: Vec<&str> = vec![$([$($str_val),+][0]),+];
                ::std::result::Result::Err(serde::de::Error::custom(format!(
                    "unknown variant '{}', expected one of: {}",
                    s,
                    expected.join(", ")
                )))
            }
        }
    };
}
