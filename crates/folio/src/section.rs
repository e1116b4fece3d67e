//! Identifiers of the page sections.

/// The sections of the page, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionId {
    Hero,
    About,
    Skills,
    Projects,
    Education,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 6] = [
        SectionId::Hero,
        SectionId::About,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Education,
        SectionId::Contact,
    ];

    /// Label in the navigation bar.
    pub fn nav_label(self) -> &'static str {
        match self {
            SectionId::Hero => "Home",
            SectionId::About => "About",
            SectionId::Skills => "Skills",
            SectionId::Projects => "Projects",
            SectionId::Education => "Education",
            SectionId::Contact => "Contact",
        }
    }

    /// Section heading as (plain, accented) halves.
    pub fn heading(self) -> (&'static str, &'static str) {
        match self {
            SectionId::Hero => ("", ""),
            SectionId::About => ("About ", "Me"),
            SectionId::Skills => ("Technical ", "Skills"),
            SectionId::Projects => ("Featured ", "Projects"),
            SectionId::Education => ("Education & ", "Certifications"),
            SectionId::Contact => ("Get In ", "Touch"),
        }
    }

    /// Position in [`SectionId::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Section for a 1-based navigation digit.
    pub fn from_digit(digit: char) -> Option<Self> {
        let n = digit.to_digit(10)? as usize;
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }

    pub fn prev(self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_digit() {
        assert_eq!(SectionId::from_digit('1'), Some(SectionId::Hero));
        assert_eq!(SectionId::from_digit('6'), Some(SectionId::Contact));
        assert_eq!(SectionId::from_digit('0'), None);
        assert_eq!(SectionId::from_digit('7'), None);
        assert_eq!(SectionId::from_digit('x'), None);
    }

    #[test]
    fn test_next_prev_saturate() {
        assert_eq!(SectionId::Hero.prev(), SectionId::Hero);
        assert_eq!(SectionId::Contact.next(), SectionId::Contact);
        assert_eq!(SectionId::About.next(), SectionId::Skills);
    }
}
