//! Five elements, heavenly stems and earthly branches
//!
//! Stem indices: 甲(0) 乙(1) 丙(2) 丁(3) 戊(4) 己(5) 庚(6) 辛(7) 壬(8) 癸(9)
//! Branch indices: 子(0) 丑(1) 寅(2) 卯(3) 辰(4) 巳(5) 午(6) 未(7) 申(8) 酉(9) 戌(10) 亥(11)

use serde::{Deserialize, Serialize};

/// One of the five elements (Wuxing)
///
/// Variants are declared in canonical order; `Ord` follows that order and is
/// used as the tie-breaker wherever elements are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    /// All elements in canonical order
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    pub fn index(&self) -> usize {
        match self {
            Self::Wood => 0,
            Self::Fire => 1,
            Self::Earth => 2,
            Self::Metal => 3,
            Self::Water => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wood => "wood",
            Self::Fire => "fire",
            Self::Earth => "earth",
            Self::Metal => "metal",
            Self::Water => "water",
        }
    }

    /// The element this one feeds (wood → fire → earth → metal → water → wood)
    pub fn generates(&self) -> Element {
        match self {
            Self::Wood => Self::Fire,
            Self::Fire => Self::Earth,
            Self::Earth => Self::Metal,
            Self::Metal => Self::Water,
            Self::Water => Self::Wood,
        }
    }

    /// The element that feeds this one
    pub fn generated_by(&self) -> Element {
        match self {
            Self::Wood => Self::Water,
            Self::Fire => Self::Wood,
            Self::Earth => Self::Fire,
            Self::Metal => Self::Earth,
            Self::Water => Self::Metal,
        }
    }

    /// The element this one restrains (wood → earth → water → fire → metal → wood)
    pub fn controls(&self) -> Element {
        match self {
            Self::Wood => Self::Earth,
            Self::Earth => Self::Water,
            Self::Water => Self::Fire,
            Self::Fire => Self::Metal,
            Self::Metal => Self::Wood,
        }
    }

    /// The element that restrains this one
    pub fn controlled_by(&self) -> Element {
        match self {
            Self::Wood => Self::Metal,
            Self::Fire => Self::Water,
            Self::Earth => Self::Wood,
            Self::Metal => Self::Fire,
            Self::Water => Self::Earth,
        }
    }

    pub fn colors(&self) -> &'static [&'static str] {
        match self {
            Self::Wood => &["green", "cyan"],
            Self::Fire => &["red", "purple"],
            Self::Earth => &["yellow", "brown"],
            Self::Metal => &["white", "gold"],
            Self::Water => &["black", "blue"],
        }
    }

    /// Lucky numbers after the Hetu diagram
    pub fn lucky_numbers(&self) -> [u8; 2] {
        match self {
            Self::Wood => [3, 8],
            Self::Fire => [2, 7],
            Self::Earth => [5, 0],
            Self::Metal => [4, 9],
            Self::Water => [1, 6],
        }
    }

    pub fn direction(&self) -> &'static str {
        match self {
            Self::Wood => "east",
            Self::Fire => "south",
            Self::Earth => "center",
            Self::Metal => "west",
            Self::Water => "north",
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Yin/yang polarity of a stem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Yang,
    Yin,
}

/// One of the ten heavenly stems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeavenlyStem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

impl HeavenlyStem {
    pub const ALL: [HeavenlyStem; 10] = [
        HeavenlyStem::Jia,
        HeavenlyStem::Yi,
        HeavenlyStem::Bing,
        HeavenlyStem::Ding,
        HeavenlyStem::Wu,
        HeavenlyStem::Ji,
        HeavenlyStem::Geng,
        HeavenlyStem::Xin,
        HeavenlyStem::Ren,
        HeavenlyStem::Gui,
    ];

    /// Stem at a position in the cycle; any integer wraps around
    pub fn from_index(index: i64) -> Self {
        Self::ALL[index.rem_euclid(10) as usize]
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or_default()
    }

    pub fn element(&self) -> Element {
        match self {
            Self::Jia | Self::Yi => Element::Wood,
            Self::Bing | Self::Ding => Element::Fire,
            Self::Wu | Self::Ji => Element::Earth,
            Self::Geng | Self::Xin => Element::Metal,
            Self::Ren | Self::Gui => Element::Water,
        }
    }

    pub fn polarity(&self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Self::Jia => '甲',
            Self::Yi => '乙',
            Self::Bing => '丙',
            Self::Ding => '丁',
            Self::Wu => '戊',
            Self::Ji => '己',
            Self::Geng => '庚',
            Self::Xin => '辛',
            Self::Ren => '壬',
            Self::Gui => '癸',
        }
    }
}

/// One of the twelve earthly branches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EarthlyBranch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

impl EarthlyBranch {
    pub const ALL: [EarthlyBranch; 12] = [
        EarthlyBranch::Zi,
        EarthlyBranch::Chou,
        EarthlyBranch::Yin,
        EarthlyBranch::Mao,
        EarthlyBranch::Chen,
        EarthlyBranch::Si,
        EarthlyBranch::Wu,
        EarthlyBranch::Wei,
        EarthlyBranch::Shen,
        EarthlyBranch::You,
        EarthlyBranch::Xu,
        EarthlyBranch::Hai,
    ];

    /// Branch at a position in the cycle; any integer wraps around
    pub fn from_index(index: i64) -> Self {
        Self::ALL[index.rem_euclid(12) as usize]
    }

    /// Branch ruling the two-hour window containing `hour` (子 covers 23:00-01:00)
    pub fn from_hour(hour: u32) -> Self {
        Self::from_index(((hour + 1) / 2) as i64)
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|b| b == self).unwrap_or_default()
    }

    pub fn element(&self) -> Element {
        match self {
            Self::Zi | Self::Hai => Element::Water,
            Self::Yin | Self::Mao => Element::Wood,
            Self::Si | Self::Wu => Element::Fire,
            Self::Shen | Self::You => Element::Metal,
            Self::Chou | Self::Chen | Self::Wei | Self::Xu => Element::Earth,
        }
    }

    pub fn zodiac(&self) -> &'static str {
        match self {
            Self::Zi => "rat",
            Self::Chou => "ox",
            Self::Yin => "tiger",
            Self::Mao => "rabbit",
            Self::Chen => "dragon",
            Self::Si => "snake",
            Self::Wu => "horse",
            Self::Wei => "goat",
            Self::Shen => "monkey",
            Self::You => "rooster",
            Self::Xu => "dog",
            Self::Hai => "pig",
        }
    }

    /// Starting hour of the branch's two-hour window (子 starts at 23:00)
    pub fn start_hour(&self) -> u32 {
        ((self.index() as u32) * 2 + 23) % 24
    }

    pub fn symbol(&self) -> char {
        match self {
            Self::Zi => '子',
            Self::Chou => '丑',
            Self::Yin => '寅',
            Self::Mao => '卯',
            Self::Chen => '辰',
            Self::Si => '巳',
            Self::Wu => '午',
            Self::Wei => '未',
            Self::Shen => '申',
            Self::You => '酉',
            Self::Xu => '戌',
            Self::Hai => '亥',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_and_control_are_inverse() {
        for element in Element::ALL {
            assert_eq!(element.generates().generated_by(), element);
            assert_eq!(element.controls().controlled_by(), element);
        }
    }

    #[test]
    fn test_stem_wraps_negative_indices() {
        assert_eq!(HeavenlyStem::from_index(-1), HeavenlyStem::Gui);
        assert_eq!(HeavenlyStem::from_index(10), HeavenlyStem::Jia);
    }

    #[test]
    fn test_stem_polarity_alternates() {
        assert_eq!(HeavenlyStem::Jia.polarity(), Polarity::Yang);
        assert_eq!(HeavenlyStem::Yi.polarity(), Polarity::Yin);
        assert_eq!(HeavenlyStem::Gui.polarity(), Polarity::Yin);
    }

    #[test]
    fn test_branch_from_hour() {
        assert_eq!(EarthlyBranch::from_hour(23), EarthlyBranch::Zi);
        assert_eq!(EarthlyBranch::from_hour(0), EarthlyBranch::Zi);
        assert_eq!(EarthlyBranch::from_hour(1), EarthlyBranch::Chou);
        assert_eq!(EarthlyBranch::from_hour(12), EarthlyBranch::Wu);
        assert_eq!(EarthlyBranch::from_hour(22), EarthlyBranch::Hai);
    }

    #[test]
    fn test_branch_window_start_hours() {
        assert_eq!(EarthlyBranch::Zi.start_hour(), 23);
        assert_eq!(EarthlyBranch::Chou.start_hour(), 1);
        assert_eq!(EarthlyBranch::Wu.start_hour(), 11);
        assert_eq!(EarthlyBranch::Hai.start_hour(), 21);
    }

    #[test]
    fn test_element_serializes_snake_case() {
        let json = serde_json::to_string(&Element::Metal).expect("serialization should succeed");
        assert_eq!(json, "\"metal\"");
    }
}
