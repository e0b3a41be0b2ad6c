/// Minimum score accepted at sign-up.
pub const MIN_SIGNUP_STRENGTH: u8 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrengthLabel {
    Weak,
    Fair,
    Good,
    Strong,
}

/// Score a password from 0 to 100 on length and character variety.
pub fn password_strength(password: &str) -> u8 {
    if password.is_empty() {
        return 0;
    }

    let len = password.chars().count();
    let mut strength: u32 = 0;

    if len >= 8 {
        strength += 25;
    }
    if len >= 12 {
        strength += 10;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        strength += 25;
    }
    if password.chars().any(|c| c.is_ascii_lowercase()) {
        strength += 20;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        strength += 15;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        strength += 15;
    }

    strength.min(100) as u8
}

pub fn strength_label(strength: u8) -> StrengthLabel {
    match strength {
        0..30 => StrengthLabel::Weak,
        30..60 => StrengthLabel::Fair,
        60..80 => StrengthLabel::Good,
        _ => StrengthLabel::Strong,
    }
}
