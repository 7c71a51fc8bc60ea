use smol_str::SmolStr;
use std::{fmt, str::FromStr};

use crate::ValueError;
use crate::grammar::{Cursor, ParseError, is_token};

/// A product identifier, e.g. `curl/8.4.0`.
///
/// ```text
/// product         = token [ "/" product-version ]
/// product-version = token
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Product {
    name: SmolStr,
    version: Option<SmolStr>,
}

impl Product {
    pub fn new(name: &str, version: Option<&str>) -> Result<Self, ValueError> {
        for (field, value) in [("product name", Some(name)), ("product version", version)] {
            if let Some(value) = value
                && !is_token(value)
            {
                let mut cursor = Cursor::new(value);
                let err = cursor
                    .read_token()
                    .and_then(|_| cursor.finish())
                    .err()
                    .unwrap_or_else(|| ParseError::missing_value(0));
                return Err(ValueError::invalid_identity(field, value, err));
            }
        }
        Ok(Self {
            name: SmolStr::new(name),
            version: version.map(SmolStr::new),
        })
    }

    fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ParseError> {
        let name = SmolStr::new(cursor.read_token()?);
        let version = if cursor.try_consume('/') {
            Some(SmolStr::new(cursor.read_token()?))
        } else {
            None
        };
        Ok(Self { name, version })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(version) = &self.version {
            write!(f, "/{version}")?;
        }
        Ok(())
    }
}

/// An element of a product list: a product or a comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProductItem {
    Product(Product),
    /// The raw text between the outer parentheses, escapes left as-is.
    Comment(SmolStr),
}

impl fmt::Display for ProductItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Product(product) => product.fmt(f),
            Self::Comment(comment) => write!(f, "({comment})"),
        }
    }
}

/// The product list of `User-Agent` and `Server`.
///
/// The first element is always a product.
///
/// ```text
/// User-Agent = product *( RWS ( product / comment ) )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Products {
    product: Product,
    rest: Vec<ProductItem>,
}

impl Products {
    #[must_use]
    pub fn new(product: Product) -> Self {
        Self {
            product,
            rest: Vec::new(),
        }
    }

    pub(crate) fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ParseError> {
        if cursor.rest().trim_matches([' ', '\t']).is_empty() {
            return Err(ParseError::EmptyText);
        }
        cursor.skip_whitespace();
        let mut products = Self::new(Product::parse(cursor)?);
        loop {
            cursor.skip_whitespace();
            match cursor.peek() {
                None => return Ok(products),
                Some('(') => {
                    let comment = cursor.read_comment()?;
                    products.rest.push(ProductItem::Comment(SmolStr::new(comment)));
                }
                Some(_) => products
                    .rest
                    .push(ProductItem::Product(Product::parse(cursor)?)),
            }
        }
    }

    /// Append a product.
    #[must_use]
    pub fn with_product(mut self, product: Product) -> Self {
        self.rest.push(ProductItem::Product(product));
        self
    }

    /// Append a comment, given without the outer parentheses.
    /// Parentheses inside must be balanced.
    pub fn with_comment(mut self, comment: &str) -> Result<Self, ValueError> {
        let wrapped = format!("({comment})");
        let mut cursor = Cursor::new(&wrapped);
        cursor
            .read_comment()
            .and_then(|_| cursor.finish())
            .map_err(|err| ValueError::invalid_identity("comment", &wrapped, err))?;
        self.rest.push(ProductItem::Comment(SmolStr::new(comment)));
        Ok(self)
    }

    /// The leading product.
    #[must_use]
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// All items, starting with the leading product.
    pub fn iter(&self) -> impl Iterator<Item = ProductItemRef<'_>> {
        std::iter::once(ProductItemRef::Product(&self.product)).chain(self.rest.iter().map(
            |item| match item {
                ProductItem::Product(product) => ProductItemRef::Product(product),
                ProductItem::Comment(comment) => ProductItemRef::Comment(comment),
            },
        ))
    }
}

/// A borrowed [`ProductItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductItemRef<'a> {
    Product(&'a Product),
    Comment(&'a str),
}

impl FromStr for Products {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cursor = Cursor::new(s);
        Ok(Self::parse(&mut cursor)?)
    }
}

impl fmt::Display for Products {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.product.fmt(f)?;
        for item in &self.rest {
            write!(f, " {item}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_products() {
        let input = "Mozilla/5.0 (X11; Linux x86_64; rv:120.0) Gecko/20100101 Firefox/120.0";
        let products: Products = input.parse().unwrap();
        assert_eq!(products.product().name(), "Mozilla");
        assert_eq!(products.product().version(), Some("5.0"));
        let items: Vec<_> = products.iter().collect();
        assert_eq!(items.len(), 4);
        assert_eq!(
            items[1],
            ProductItemRef::Comment("X11; Linux x86_64; rv:120.0")
        );
        assert_eq!(products.to_string(), input);
    }

    #[test]
    fn test_nested_comment() {
        let products: Products = "agent (a (nested) \\) comment)".parse().unwrap();
        assert_eq!(products.to_string(), "agent (a (nested) \\) comment)");
    }

    #[test]
    fn test_parse_invalid() {
        for (input, expected) in [
            ("", ParseError::EmptyText),
            ("   ", ParseError::EmptyText),
            ("(comment) agent", ParseError::invalid_character('(', 0)),
            ("agent/", ParseError::missing_value(6)),
            ("agent (open", ParseError::missing_value(11)),
            ("agent/1.0 /2", ParseError::invalid_character('/', 10)),
        ] {
            assert_eq!(
                input.parse::<Products>(),
                Err(ValueError::Syntax(expected)),
                "{input:?}"
            );
        }
    }

    #[test]
    fn test_build() {
        let products = Products::new(Product::new("fieldval", Some("0.1")).unwrap())
            .with_comment("+https://example.com")
            .unwrap()
            .with_product(Product::new("curl", None).unwrap());
        assert_eq!(
            products.to_string(),
            "fieldval/0.1 (+https://example.com) curl"
        );
        assert_eq!(products.to_string().parse::<Products>().unwrap(), products);

        assert!(Product::new("bad name", None).is_err());
        assert!(Product::new("name", Some("")).is_err());
        assert!(Products::new(Product::new("a", None).unwrap())
            .with_comment("unbalanced (")
            .is_err());
    }
}
