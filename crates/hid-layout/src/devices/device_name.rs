use std::fmt::Display;

/// Owned manufacturer name / product name pair
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceName {
    manufacturer: String,
    product: String,
}

impl DeviceName {
    pub fn new(manufacturer: String, product: String) -> Self {
        DeviceName {
            manufacturer,
            product,
        }
    }

    /// Name from optional device strings, if both are present and non-empty
    pub fn from_strings(manufacturer: Option<&str>, product: Option<&str>) -> Option<Self> {
        match (manufacturer, product) {
            (Some(manufacturer), Some(product))
                if !manufacturer.is_empty() && !product.is_empty() =>
            {
                Some(DeviceName::new(manufacturer.to_string(), product.to_string()))
            }
            _ => None,
        }
    }

    pub fn manufacturer(&self) -> &str {
        self.manufacturer.as_str()
    }

    pub fn product(&self) -> &str {
        self.product.as_str()
    }
}

impl Display for DeviceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.manufacturer, self.product)
    }
}
