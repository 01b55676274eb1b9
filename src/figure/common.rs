//! Palette and title helpers shared by the figure builders.

pub const GRAY: &str = "rgb(165, 165, 165)";
pub const YELLOW: &str = "rgb(255,255,0)";
pub const RED: &str = "rgb(255, 0, 0)";
pub const OLIVE: &str = "rgb(126, 96, 0)";

pub const FOSSIL: &str = "rgb(247, 92, 92)";
pub const RENEWABLES: &str = "rgb(112, 173, 70)";
pub const NUCLEAR: &str = "rgb(254, 102, 203)";
pub const OTHER_RENEWABLE: &str = "rgb(68, 115, 197)";

pub const TITLE_FONT_SIZE: u32 = 18;

/// Country name used for the worldwide aggregate rows.
pub const WORLD: &str = "World";

/// Bold heading followed by a smaller subtitle line.
pub fn headline(heading: &str, subtitle: &str) -> String {
    format!("<b>{heading}</b><br><span style='font-size: 12px'>{subtitle}</span>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headline_markup() {
        assert_eq!(
            headline("A", "b"),
            "<b>A</b><br><span style='font-size: 12px'>b</span>"
        );
    }
}
