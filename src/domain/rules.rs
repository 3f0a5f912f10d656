use std::fmt;
use std::str::FromStr;

use super::error::RuleParseError;

/// Life-like rule stored as birth and survival neighbour-count masks.
/// Bit `n` of a mask is set when a neighbour count of `n` triggers it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rule {
    name: &'static str,
    birth: u16,
    survive: u16,
}

const fn mask(counts: &[u8]) -> u16 {
    let mut bits = 0;
    let mut i = 0;
    while i < counts.len() {
        bits |= 1 << counts[i];
        i += 1;
    }
    bits
}

impl Rule {
    /// Conway's Game of Life (B3/S23)
    pub const CONWAY: Rule = Rule::preset("conway", &[3], &[2, 3]);
    /// Replicators appear with 6-neighbour births (B36/S23)
    pub const HIGHLIFE: Rule = Rule::preset("highlife", &[3, 6], &[2, 3]);
    /// Symmetric under inversion (B3678/S34678)
    pub const DAY_AND_NIGHT: Rule = Rule::preset("daynight", &[3, 6, 7, 8], &[3, 4, 6, 7, 8]);
    /// Nothing survives (B2/S)
    pub const SEEDS: Rule = Rule::preset("seeds", &[2], &[]);
    pub const LIFE_34: Rule = Rule::preset("life34", &[3, 4], &[3, 4]);
    pub const DIAMOEBA: Rule = Rule::preset("diamoeba", &[3, 5, 6, 7, 8], &[5, 6, 7, 8]);
    pub const MORLEY: Rule = Rule::preset("morley", &[3, 6, 8], &[2, 4, 5]);
    pub const ANNEAL: Rule = Rule::preset("anneal", &[4, 6, 7, 8], &[3, 5, 6, 7, 8]);

    const fn preset(name: &'static str, birth: &[u8], survive: &[u8]) -> Self {
        Self {
            name,
            birth: mask(birth),
            survive: mask(survive),
        }
    }

    /// Every preset in cycling order, Conway first
    pub fn presets() -> &'static [Rule] {
        &PRESETS
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Next state of a cell given its current state and live neighbour count
    #[inline]
    pub const fn evolve(&self, alive: bool, neighbors: u8) -> bool {
        let bit = 1 << neighbors;
        if alive {
            self.survive & bit != 0
        } else {
            self.birth & bit != 0
        }
    }

    /// Preset following this one, wrapping around. Custom rules go back to Conway.
    pub fn next_preset(&self) -> Rule {
        let presets = Rule::presets();
        presets
            .iter()
            .position(|r| r == self)
            .map_or(Rule::CONWAY, |i| presets[(i + 1) % presets.len()])
    }

    /// B/S notation, e.g. `B36/S23`
    pub fn notation(&self) -> String {
        let digits = |bits: u16| -> String {
            (0..=8u8)
                .filter(|&n| bits & (1 << n) != 0)
                .map(|n| char::from(b'0' + n))
                .collect()
        };
        format!("B{}/S{}", digits(self.birth), digits(self.survive))
    }
}

static PRESETS: [Rule; 8] = [
    Rule::CONWAY,
    Rule::HIGHLIFE,
    Rule::DAY_AND_NIGHT,
    Rule::SEEDS,
    Rule::LIFE_34,
    Rule::DIAMOEBA,
    Rule::MORLEY,
    Rule::ANNEAL,
];

impl Default for Rule {
    fn default() -> Self {
        Rule::CONWAY
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.notation())
    }
}

impl FromStr for Rule {
    type Err = RuleParseError;

    /// Accepts a preset name (case-insensitive) or B/S notation
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(preset) = Rule::presets()
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(trimmed))
        {
            return Ok(*preset);
        }

        let upper = trimmed.to_ascii_uppercase();
        let (b, s_part) = upper
            .split_once('/')
            .ok_or_else(|| RuleParseError::Unknown(trimmed.to_owned()))?;
        let (b, s_part) = match (b.strip_prefix('B'), s_part.strip_prefix('S')) {
            (Some(b), Some(s)) => (b, s),
            _ => return Err(RuleParseError::Unknown(trimmed.to_owned())),
        };

        let parse_counts = |digits: &str| -> Result<u16, RuleParseError> {
            digits.chars().try_fold(0u16, |bits, c| match c.to_digit(10) {
                Some(n) if n <= 8 => Ok(bits | 1 << n),
                _ => Err(RuleParseError::InvalidCount {
                    rule: trimmed.to_owned(),
                    digit: c,
                }),
            })
        };
        let birth = parse_counts(b)?;
        let survive = parse_counts(s_part)?;

        Ok(Rule::presets()
            .iter()
            .copied()
            .find(|r| r.birth == birth && r.survive == survive)
            .unwrap_or(Rule {
                name: "custom",
                birth,
                survive,
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conway_rules() {
        let rule = Rule::CONWAY;

        // Underpopulation
        assert!(!rule.evolve(true, 0));
        assert!(!rule.evolve(true, 1));

        // Survival
        assert!(rule.evolve(true, 2));
        assert!(rule.evolve(true, 3));

        // Overpopulation
        assert!(!rule.evolve(true, 4));
        assert!(!rule.evolve(true, 8));

        // Reproduction
        assert!(rule.evolve(false, 3));
        assert!(!rule.evolve(false, 2));
    }

    #[test]
    fn test_highlife_reproduction() {
        let rule = Rule::HIGHLIFE;
        assert!(rule.evolve(false, 6));
        assert!(rule.evolve(false, 3));
    }

    #[test]
    fn test_seeds_always_dies() {
        let rule = Rule::SEEDS;
        assert!(!rule.evolve(true, 0));
        assert!(!rule.evolve(true, 2));
        assert!(!rule.evolve(true, 8));
        assert!(rule.evolve(false, 2));
        assert!(!rule.evolve(false, 3));
    }

    #[test]
    fn test_parse_names_and_notation() {
        assert_eq!("Conway".parse::<Rule>().unwrap(), Rule::CONWAY);
        assert_eq!("b36/s23".parse::<Rule>().unwrap(), Rule::HIGHLIFE);
        assert_eq!("B2/S".parse::<Rule>().unwrap(), Rule::SEEDS);

        let custom: Rule = "B1/S1".parse().unwrap();
        assert_eq!(custom.name(), "custom");
        assert!(custom.evolve(false, 1));
        assert_eq!(custom.notation(), "B1/S1");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            "wireworld".parse::<Rule>(),
            Err(RuleParseError::Unknown("wireworld".into()))
        );
        assert!(matches!(
            "B39/S23".parse::<Rule>(),
            Err(RuleParseError::InvalidCount { digit: '9', .. })
        ));
    }

    #[test]
    fn test_next_preset_wraps() {
        assert_eq!(Rule::CONWAY.next_preset(), Rule::HIGHLIFE);
        assert_eq!(Rule::ANNEAL.next_preset(), Rule::CONWAY);
    }
}
