//! Move type tags.
//!
//! Resource types come back from the node as strings such as
//! `0x1::Coin::CoinStore<0x1::TestCoin::TestCoin>`. This module parses them
//! into [`TypeTag`]/[`StructTag`] values so callers can match on the
//! address, module and struct name instead of on substrings.
//!
//! Parsing enforces length and nesting limits.

use crate::error::{EmporiumError, EmporiumResult};
use crate::types::AccountAddress;
use std::fmt;
use std::str::FromStr;

/// Maximum length for type tag strings.
const MAX_TYPE_TAG_LENGTH: usize = 1024;

/// Maximum length for identifier strings.
const MAX_IDENTIFIER_LENGTH: usize = 128;

/// Maximum depth for nested type arguments.
const MAX_TYPE_NESTING_DEPTH: usize = 8;

/// An identifier in Move (module name, struct name, function name).
///
/// Identifiers start with a letter or underscore and contain only
/// alphanumeric characters and underscores.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Creates a new identifier, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty, longer than 128 bytes, or
    /// contains characters outside `[A-Za-z0-9_]`.
    pub fn new(s: impl Into<String>) -> EmporiumResult<Self> {
        let s = s.into();
        if s.len() > MAX_IDENTIFIER_LENGTH {
            return Err(EmporiumError::InvalidTypeTag(format!(
                "identifier too long: {} bytes (max {})",
                s.len(),
                MAX_IDENTIFIER_LENGTH
            )));
        }
        let Some(first) = s.chars().next() else {
            return Err(EmporiumError::InvalidTypeTag(
                "identifier cannot be empty".into(),
            ));
        };
        if !first.is_ascii_alphabetic() && first != '_' {
            return Err(EmporiumError::InvalidTypeTag(format!(
                "identifier must start with letter or underscore: {s}"
            )));
        }
        if !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(EmporiumError::InvalidTypeTag(format!(
                "identifier contains invalid characters: {s}"
            )));
        }
        Ok(Self(s))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A struct tag: `address::module::StructName<TypeArg, ...>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StructTag {
    /// The address where the module is published.
    pub address: AccountAddress,
    /// The module name.
    pub module: Identifier,
    /// The struct name.
    pub name: Identifier,
    /// Type arguments (for generic structs).
    pub type_args: Vec<TypeTag>,
}

impl StructTag {
    /// Parses a string that must describe a struct (not a primitive or vector).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a well-formed struct tag.
    pub fn from_str_strict(s: &str) -> EmporiumResult<Self> {
        match TypeTag::from_str_strict(s)? {
            TypeTag::Struct(tag) => Ok(*tag),
            other => Err(EmporiumError::InvalidTypeTag(format!(
                "expected a struct type, got {other}"
            ))),
        }
    }

    /// Returns true if this struct is `address::module::name`, ignoring type arguments.
    pub fn is(&self, address: AccountAddress, module: &str, name: &str) -> bool {
        self.address == address && self.module.as_str() == module && self.name.as_str() == name
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{}::{}",
            self.address.to_short_string(),
            self.module,
            self.name
        )?;
        if !self.type_args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.type_args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{arg}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl FromStr for StructTag {
    type Err = EmporiumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_strict(s)
    }
}

/// A Move type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// `bool`
    Bool,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `u128`
    U128,
    /// `u256`
    U256,
    /// `address`
    Address,
    /// `signer`
    Signer,
    /// `vector<T>`
    Vector(Box<TypeTag>),
    /// A struct type
    Struct(Box<StructTag>),
}

impl TypeTag {
    /// Parses a type tag from a string.
    ///
    /// ```rust
    /// use coin_emporium_sdk::types::TypeTag;
    ///
    /// let tag = TypeTag::from_str_strict("0x1::Coin::CoinStore<0x1::TestCoin::TestCoin>").unwrap();
    /// assert_eq!(tag.to_string(), "0x1::Coin::CoinStore<0x1::TestCoin::TestCoin>");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error on malformed input, on strings longer than 1024 bytes
    /// and on nesting deeper than 8 levels.
    pub fn from_str_strict(s: &str) -> EmporiumResult<Self> {
        let s = s.trim();
        if s.len() > MAX_TYPE_TAG_LENGTH {
            return Err(EmporiumError::InvalidTypeTag(format!(
                "type tag too long: {} bytes (max {})",
                s.len(),
                MAX_TYPE_TAG_LENGTH
            )));
        }
        Self::parse_with_depth(s, 0)
    }

    fn parse_with_depth(s: &str, depth: usize) -> EmporiumResult<Self> {
        if depth > MAX_TYPE_NESTING_DEPTH {
            return Err(EmporiumError::InvalidTypeTag(format!(
                "type tag nesting too deep: {depth} levels (max {MAX_TYPE_NESTING_DEPTH})"
            )));
        }

        match s {
            "bool" => return Ok(TypeTag::Bool),
            "u8" => return Ok(TypeTag::U8),
            "u16" => return Ok(TypeTag::U16),
            "u32" => return Ok(TypeTag::U32),
            "u64" => return Ok(TypeTag::U64),
            "u128" => return Ok(TypeTag::U128),
            "u256" => return Ok(TypeTag::U256),
            "address" => return Ok(TypeTag::Address),
            "signer" => return Ok(TypeTag::Signer),
            _ => {}
        }

        if let Some(inner) = s.strip_prefix("vector<").and_then(|r| r.strip_suffix('>')) {
            let inner_tag = Self::parse_with_depth(inner.trim(), depth + 1)?;
            return Ok(TypeTag::Vector(Box::new(inner_tag)));
        }

        Self::parse_struct_with_depth(s, depth)
    }

    fn parse_struct_with_depth(s: &str, depth: usize) -> EmporiumResult<Self> {
        let (base, type_args_str) = match s.find('<') {
            Some(idx) => {
                if !s.ends_with('>') {
                    return Err(EmporiumError::InvalidTypeTag(format!(
                        "malformed generic type: {s}"
                    )));
                }
                (&s[..idx], Some(&s[idx + 1..s.len() - 1]))
            }
            None => (s, None),
        };

        let parts: Vec<&str> = base.trim().split("::").collect();
        let [address, module, name] = parts.as_slice() else {
            return Err(EmporiumError::InvalidTypeTag(format!(
                "invalid struct type format (expected address::module::name): {s}"
            )));
        };

        let address = AccountAddress::from_hex(address)
            .map_err(|e| EmporiumError::InvalidTypeTag(format!("{s}: {e}")))?;
        let module = Identifier::new(*module)?;
        let name = Identifier::new(*name)?;

        let type_args = match type_args_str {
            Some(args) => Self::parse_args_with_depth(args, depth)?,
            None => vec![],
        };

        Ok(TypeTag::Struct(Box::new(StructTag {
            address,
            module,
            name,
            type_args,
        })))
    }

    /// Splits comma-separated type arguments at bracket depth zero.
    fn parse_args_with_depth(s: &str, depth: usize) -> EmporiumResult<Vec<TypeTag>> {
        if s.trim().is_empty() {
            return Ok(vec![]);
        }

        let mut result = Vec::new();
        let mut bracket_depth: i32 = 0;
        let mut start = 0;

        for (i, c) in s.char_indices() {
            match c {
                '<' => bracket_depth += 1,
                '>' => {
                    bracket_depth -= 1;
                    if bracket_depth < 0 {
                        return Err(EmporiumError::InvalidTypeTag(format!(
                            "unbalanced brackets: {s}"
                        )));
                    }
                }
                ',' if bracket_depth == 0 => {
                    result.push(Self::parse_with_depth(s[start..i].trim(), depth + 1)?);
                    start = i + 1;
                }
                _ => {}
            }
        }
        if bracket_depth != 0 {
            return Err(EmporiumError::InvalidTypeTag(format!(
                "unbalanced brackets: {s}"
            )));
        }

        result.push(Self::parse_with_depth(s[start..].trim(), depth + 1)?);
        Ok(result)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::U8 => write!(f, "u8"),
            TypeTag::U16 => write!(f, "u16"),
            TypeTag::U32 => write!(f, "u32"),
            TypeTag::U64 => write!(f, "u64"),
            TypeTag::U128 => write!(f, "u128"),
            TypeTag::U256 => write!(f, "u256"),
            TypeTag::Address => write!(f, "address"),
            TypeTag::Signer => write!(f, "signer"),
            TypeTag::Vector(inner) => write!(f, "vector<{inner}>"),
            TypeTag::Struct(tag) => write!(f, "{tag}"),
        }
    }
}

impl FromStr for TypeTag {
    type Err = EmporiumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_strict(s)
    }
}

/// Returns the text between the outermost generic brackets of a type tag
/// string, exactly as the node wrote it.
///
/// `0x1::Coin::CoinStore<0xA::B::C>` yields `Some("0xA::B::C")`; a tag
/// without generics yields `None`.
pub fn generic_params(s: &str) -> Option<&str> {
    let s = s.trim();
    let open = s.find('<')?;
    let inner = s.strip_suffix('>')?.get(open + 1..)?;
    Some(inner.trim())
}

/// Returns everything from the first `<` onward, or an empty string.
pub fn generic_suffix(s: &str) -> &str {
    let s = s.trim();
    s.find('<').map_or("", |idx| &s[idx..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier() {
        assert!(Identifier::new("Faucet").is_ok());
        assert!(Identifier::new("_private").is_ok());
        assert!(Identifier::new("").is_err());
        assert!(Identifier::new("1abc").is_err());
        assert!(Identifier::new("a-b").is_err());
        assert!(Identifier::new("a".repeat(129)).is_err());
    }

    #[test]
    fn test_primitives() {
        assert_eq!(TypeTag::from_str_strict("u64").unwrap(), TypeTag::U64);
        assert_eq!(TypeTag::from_str_strict(" bool ").unwrap(), TypeTag::Bool);
        assert_eq!(
            TypeTag::from_str_strict("vector<u8>").unwrap(),
            TypeTag::Vector(Box::new(TypeTag::U8))
        );
    }

    #[test]
    fn test_coin_store_tag() {
        let tag =
            StructTag::from_str_strict("0x1::Coin::CoinStore<0x1::TestCoin::TestCoin>").unwrap();
        assert!(tag.is(AccountAddress::ONE, "Coin", "CoinStore"));
        assert_eq!(tag.type_args.len(), 1);
        assert_eq!(tag.type_args[0].to_string(), "0x1::TestCoin::TestCoin");
    }

    #[test]
    fn test_long_address_struct() {
        let addr = format!("0x{}", "ab".repeat(32));
        let raw = format!("{addr}::Faucet::FaucetMeta<{addr}::FooCoin::FooCoin>");
        let tag = StructTag::from_str_strict(&raw).unwrap();
        assert_eq!(tag.address, AccountAddress::from_hex(&addr).unwrap());
        assert_eq!(tag.name.as_str(), "FaucetMeta");
    }

    #[test]
    fn test_multiple_and_nested_args() {
        let tag = StructTag::from_str_strict("0x1::M::S<u64, vector<0x1::A::B<u8>>, bool>").unwrap();
        assert_eq!(tag.type_args.len(), 3);
        assert_eq!(tag.to_string(), "0x1::M::S<u64, vector<0x1::A::B<u8>>, bool>");
    }

    #[test]
    fn test_invalid() {
        assert!(TypeTag::from_str_strict("").is_err());
        assert!(TypeTag::from_str_strict("0x1::Coin").is_err());
        assert!(TypeTag::from_str_strict("0x1::Coin::CoinStore<u8").is_err());
        assert!(TypeTag::from_str_strict("0x1::Coin::CoinStore<u8>>").is_err());
        assert!(TypeTag::from_str_strict("0x1::Coin::CoinStore<u8,>").is_err());
        assert!(TypeTag::from_str_strict("zz::Coin::CoinStore").is_err());
        assert!(StructTag::from_str_strict("u64").is_err());
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}u8{}", "vector<".repeat(10), ">".repeat(10));
        assert!(TypeTag::from_str_strict(&deep).is_err());
    }

    #[test]
    fn test_generic_params() {
        assert_eq!(
            generic_params("0x1::Coin::CoinStore<0x1::TestCoin::TestCoin>"),
            Some("0x1::TestCoin::TestCoin")
        );
        assert_eq!(generic_params("0x1::TestCoin::TestCoin"), None);
    }

    #[test]
    fn test_generic_suffix() {
        assert_eq!(
            generic_suffix("0xabc::Faucet::FaucetMeta<0xabc::Foo::Foo>"),
            "<0xabc::Foo::Foo>"
        );
        assert_eq!(generic_suffix("0xabc::Faucet::FaucetMeta"), "");
    }
}
