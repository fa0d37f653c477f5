use serde::{Deserialize, Serialize};

/// Display level of a day, from no activity to the darkest shade.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Intensity {
    None,
    Low,
    Medium,
    High,
    Max,
}

impl Intensity {
    pub const ALL: [Intensity; 5] = [
        Intensity::None,
        Intensity::Low,
        Intensity::Medium,
        Intensity::High,
        Intensity::Max,
    ];

    pub fn level(self) -> u8 {
        match self {
            Intensity::None => 0,
            Intensity::Low => 1,
            Intensity::Medium => 2,
            Intensity::High => 3,
            Intensity::Max => 4,
        }
    }

    /// GitHub palette
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Intensity::None => (0xeb, 0xed, 0xf0),
            Intensity::Low => (0x9b, 0xe9, 0xa8),
            Intensity::Medium => (0x40, 0xc4, 0x63),
            Intensity::High => (0x30, 0xa1, 0x4e),
            Intensity::Max => (0x21, 0x6e, 0x39),
        }
    }

    pub fn hex(self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        let levels: Vec<u8> = Intensity::ALL.iter().map(|i| i.level()).collect();
        assert_eq!(levels, vec![0, 1, 2, 3, 4]);
        assert!(Intensity::None < Intensity::Max);
    }

    #[test]
    fn test_hex() {
        assert_eq!(Intensity::None.hex(), "#ebedf0");
        assert_eq!(Intensity::Max.hex(), "#216e39");
    }
}
