use std::{
    error::Error,
    fmt::{self, Debug, Display, Formatter},
    str::FromStr,
};

/// The namespace used when an identifier is given without one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// A two-part identifier composed of a namespace and an identifier separated by a colon, such as
/// `minecraft:stone`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct UnlocalizedName {
    /// The namespace of this unlocalized name.
    pub namespace: String,
    /// The identifier portion of this unlocalized name.
    pub identifier: String,
}

impl UnlocalizedName {
    /// Returns an unlocalized name in the default namespace with the given identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sponge_util::UnlocalizedName;
    /// let stone = UnlocalizedName::minecraft("stone");
    ///
    /// assert_eq!(stone.namespace, "minecraft");
    /// assert_eq!(stone.identifier, "stone");
    /// ```
    #[inline]
    pub fn minecraft(identifier: &str) -> UnlocalizedName {
        UnlocalizedName {
            namespace: DEFAULT_NAMESPACE.to_owned(),
            identifier: identifier.to_owned(),
        }
    }

    /// Returns whether this name has the given namespace and identifier.
    pub fn is(&self, namespace: &str, identifier: &str) -> bool {
        self.namespace == namespace && self.identifier == identifier
    }
}

impl FromStr for UnlocalizedName {
    type Err = ParseUlnError;

    /// Parses the given string into an unlocalized name.
    ///
    /// A string without a colon is taken as a bare identifier in the default namespace. Strings of
    /// the form `namespace:` or `:identifier`, or with more than one colon, are rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sponge_util::UnlocalizedName;
    /// # use std::str::FromStr;
    /// let dirt = UnlocalizedName::from_str("dirt").unwrap();
    /// assert_eq!(dirt.to_string(), "minecraft:dirt");
    ///
    /// let foobar = UnlocalizedName::from_str("foo:bar").unwrap();
    /// assert_eq!(foobar.namespace, "foo");
    /// assert_eq!(foobar.identifier, "bar");
    ///
    /// assert!(UnlocalizedName::from_str(":P").is_err());
    /// assert!(UnlocalizedName::from_str("a:b:c").is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseUlnError::Empty);
        }

        let (namespace, identifier) = match s.split_once(':') {
            Some(parts) => parts,
            None => return Ok(Self::minecraft(s)),
        };

        if namespace.is_empty() || identifier.is_empty() || identifier.contains(':') {
            return Err(ParseUlnError::Malformed(s.to_owned()));
        }

        Ok(UnlocalizedName {
            namespace: namespace.to_owned(),
            identifier: identifier.to_owned(),
        })
    }
}

impl Display for UnlocalizedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.identifier)
    }
}

impl Debug for UnlocalizedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// The error returned when a string is not a valid unlocalized name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseUlnError {
    /// The input was empty.
    Empty,
    /// The input did not have the form `namespace:identifier`.
    Malformed(String),
}

impl Display for ParseUlnError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseUlnError::Empty => write!(f, "Expected an identifier, found an empty string"),
            ParseUlnError::Malformed(input) =>
                write!(f, "Expected two strings separated by a colon, found \"{}\"", input),
        }
    }
}

impl Error for ParseUlnError {}
