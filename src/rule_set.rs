use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// # Representation
/// Life rules are represented as
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
///
/// # Examples
/// ```notrust
/// b3s23:                0000_0000_0000_1000_0000_0000_0000_1100
///
/// b0s0:                 0000_0000_0000_0000_0000_0000_0000_0000
/// b012345678s012345678: 0000_0001_1111_1111_0000_0001_1111_1111
/// ```
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    rule: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    /// Create a new `RuleSet` for the given births and survivals. For both `b` and
    /// `s`, numbers are set on a bit basis. For instance if bit `i` in `b` is on, it
    /// means `i` is included in the set of births. Any bit past the 8th is ignored.
    pub const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    /// The state a cell takes next, given whether it is alive now and how many of its
    /// neighbors are.
    ///
    /// Neighbor counts past 8 can't come from a Moore neighborhood and never match.
    pub fn next_state(&self, alive: bool, live_neighbors: u8) -> bool {
        if live_neighbors > 8 {
            return false;
        }

        let mask = 1 << live_neighbors;

        if alive {
            self.survivals() & mask == mask
        } else {
            self.births() & mask == mask
        }
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleSet({self})")
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        write_digits(self.births(), f)?;
        write!(f, "/S")?;
        write_digits(self.survivals(), f)
    }
}

fn write_digits(mask: u16, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for n in 0..=8 {
        if mask & (1 << n) != 0 {
            write!(f, "{n}")?;
        }
    }

    Ok(())
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("Expected a digit between 0 and 8, found '{got}'")]
    InvalidDigit { got: char },

    #[error("Expected a survival section in \"{rule}\"")]
    MissingSurvivals { rule: String },
}

/// Accepts `B3/S23`, `b3s23` and the nameless `3/23` form.
impl FromStr for RuleSet {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        enum State {
            Birth,
            Survival,
        }

        let s = s.trim();
        let nameless = s.starts_with(|c: char| c.is_ascii_digit() || c == '/');

        let mut state = State::Birth;
        let mut seen_survivals = false;
        let (mut b, mut s_mask) = (0u16, 0u16);

        for c in s.chars() {
            match c {
                'b' | 'B' => {
                    state = State::Birth;
                }
                's' | 'S' => {
                    state = State::Survival;
                    seen_survivals = true;
                }
                '/' => {
                    if nameless {
                        state = State::Survival;
                        seen_survivals = true;
                    }
                }
                n => {
                    let Some(n) = n.to_digit(10).filter(|n| *n <= 8) else {
                        return Err(RuleError::InvalidDigit { got: n });
                    };

                    match state {
                        State::Birth => b |= 1 << n,
                        State::Survival => s_mask |= 1 << n,
                    }
                }
            }
        }

        if !seen_survivals {
            return Err(RuleError::MissingSurvivals {
                rule: s.to_string(),
            });
        }

        Ok(RuleSet::new(b, s_mask))
    }
}

#[cfg(test)]
mod test {
    use super::RuleError;
    use super::RuleSet;
    use super::B3S23;

    #[test]
    fn conway_transitions() {
        for n in 0..=8 {
            assert_eq!(B3S23.next_state(true, n), n == 2 || n == 3, "alive with {n}");
            assert_eq!(B3S23.next_state(false, n), n == 3, "dead with {n}");
        }
    }

    #[test]
    fn parse_forms() {
        let forms = ["B3/S23", "b3s23", "3/23", " b3/s23 "];

        for form in forms {
            let rule: RuleSet = form.parse().unwrap();
            assert_eq!(rule, B3S23, "parsing {form:?}");
        }
    }

    #[test]
    fn parse_highlife() {
        let rule: RuleSet = "B36/S23".parse().unwrap();

        assert!(rule.next_state(false, 6));
        assert!(!B3S23.next_state(false, 6));
        assert_eq!(rule.to_string(), "B36/S23");
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "B39/S23".parse::<RuleSet>(),
            Err(RuleError::InvalidDigit { got: '9' })
        );
        assert_eq!(
            "B3".parse::<RuleSet>(),
            Err(RuleError::MissingSurvivals {
                rule: "B3".to_string()
            })
        );
    }

    #[test]
    fn display_round_trips_conway() {
        assert_eq!(B3S23.to_string(), "B3/S23");
        assert_eq!(RuleSet::new(0, 0).to_string(), "B/S");
    }
}
