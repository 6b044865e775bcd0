use crate::palette::Shade;
use crate::token::ColorToken;

/// Shade units per level.
pub const LEVEL: i64 = 100;

/// Default offset for badge borders.
pub const DEFAULT_BORDER_LEVELS: i32 = 2;

/// Move a palette token `levels` rungs darker (positive) or lighter
/// (negative), saturating at the ends of the ladder. Literal and alias
/// tokens are returned unchanged.
pub fn shift(token: &ColorToken, levels: i32) -> ColorToken {
    match token {
        ColorToken::Palette { family, shade } => {
            let target = shade.value() as i64 + levels as i64 * LEVEL;
            ColorToken::Palette {
                family: *family,
                shade: Shade::snap(target, *shade),
            }
        }
        other => other.clone(),
    }
}

pub fn darker(token: &ColorToken, levels: u32) -> ColorToken {
    shift(token, levels.min(i32::MAX as u32) as i32)
}

pub fn lighter(token: &ColorToken, levels: u32) -> ColorToken {
    shift(token, -(levels.min(i32::MAX as u32) as i32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::SHADE_LADDER;
    use crate::token::ThemeAlias;

    fn blue(shade: Shade) -> ColorToken {
        ColorToken::palette("blue", shade)
    }

    #[test]
    fn shifts_by_hundreds() {
        assert_eq!(shift(&blue(Shade::S500), 2), blue(Shade::S700));
        assert_eq!(shift(&blue(Shade::S500), 4), blue(Shade::S900));
        assert_eq!(shift(&blue(Shade::S500), -2), blue(Shade::S300));
        assert_eq!(darker(&blue(Shade::S500), 2), blue(Shade::S700));
        assert_eq!(lighter(&blue(Shade::S500), 2), blue(Shade::S300));
    }

    #[test]
    fn saturates_at_ladder_ends() {
        assert_eq!(lighter(&blue(Shade::S900), 10), blue(Shade::S50));
        assert_eq!(darker(&blue(Shade::S100), 100), blue(Shade::S950));
        assert_eq!(shift(&blue(Shade::S500), i32::MIN), blue(Shade::S50));
        assert_eq!(shift(&blue(Shade::S500), i32::MAX), blue(Shade::S950));
        assert_eq!(darker(&blue(Shade::S500), u32::MAX), blue(Shade::S950));
    }

    #[test]
    fn single_level_moves_one_rung_at_the_edges() {
        assert_eq!(darker(&blue(Shade::S50), 1), blue(Shade::S100));
        assert_eq!(lighter(&blue(Shade::S950), 1), blue(Shade::S900));
        assert_eq!(darker(&blue(Shade::S900), 1), blue(Shade::S950));
    }

    #[test]
    fn every_result_is_on_the_ladder() {
        for shade in SHADE_LADDER {
            for levels in -12..=12 {
                let ColorToken::Palette { shade: result, .. } = shift(&blue(shade), levels) else {
                    panic!("palette token changed shape");
                };
                assert!(SHADE_LADDER.contains(&result));
            }
        }
    }

    #[test]
    fn other_shapes_are_untouched() {
        let alias = ColorToken::Alias(ThemeAlias::Primary);
        assert_eq!(shift(&alias, 3), alias);
        let literal = ColorToken::parse("#102030").unwrap();
        assert_eq!(shift(&literal, -3), literal);
    }
}
