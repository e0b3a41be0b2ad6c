use rust_decimal::{Decimal, RoundingStrategy};

/// Render an amount with a currency symbol and thousands separators.
/// Whole amounts drop the fraction; others keep two places.
pub fn format_money(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let abs = rounded.abs();

    let whole = abs.trunc();
    let fraction = abs - whole;
    let grouped = group_thousands(&whole.normalize().to_string());

    if fraction.is_zero() {
        format!("{}{}{}", sign, symbol, grouped)
    } else {
        let cents = (fraction * Decimal::ONE_HUNDRED).trunc().normalize();
        format!("{}{}{}.{:0>2}", sign, symbol, grouped, cents.to_string())
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

/// Two-letter badge for an airline without a logo, e.g. "Air India" -> "AI".
pub fn airline_initials(airline_name: &str) -> String {
    airline_name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// Pseudo airport code from a city name, e.g. "Mumbai" -> "MUM".
pub fn airport_code(city: &str) -> String {
    city.chars().take(3).flat_map(char::to_uppercase).collect()
}

/// Strip the airport suffix from a picker label: "Delhi (DEL)" -> "Delhi".
pub fn city_name(label: &str) -> &str {
    label.split(" (").next().unwrap_or(label).trim()
}
