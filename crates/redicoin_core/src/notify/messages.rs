//! pt-BR notification texts.
//!
//! Amounts follow `Number.toLocaleString('pt-BR')`: `.` groups thousands,
//! `,` separates decimals, at most three fraction digits.

const MAX_FRACTION_DIGITS: u32 = 3;

pub fn wallet_connected() -> String {
    "Carteira conectada com sucesso!".to_string()
}

pub fn staked(amount: f64) -> String {
    format!("{} RC apostados com sucesso!", format_amount(amount))
}

pub fn transferred(amount: f64, recipient_name: &str) -> String {
    format!(
        "{} RC transferidos para {recipient_name}!",
        format_amount(amount)
    )
}

pub fn contact_added(name: &str) -> String {
    format!("Contato '{name}' adicionado!")
}

pub fn contact_updated(name: &str) -> String {
    format!("Contato '{name}' atualizado!")
}

pub fn contact_deleted(name: &str) -> String {
    format!("Contato '{name}' excluído.")
}

/// Formats an amount with pt-BR grouping and decimal separators.
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    // Integer and fraction are split before scaling so amounts past u64::MAX
    // keep every digit.
    let scale = f64::from(10_u32.pow(MAX_FRACTION_DIGITS));
    let mut integer = amount.abs().trunc();
    let mut fraction = (amount.abs().fract() * scale).round();
    if fraction >= scale {
        integer += 1.0;
        fraction = 0.0;
    }
    let fraction = fraction as u32;

    let digits = format!("{integer:.0}");
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && (integer > 0.0 || fraction > 0) {
        "-"
    } else {
        ""
    };
    if fraction == 0 {
        return format!("{sign}{grouped}");
    }

    let width = MAX_FRACTION_DIGITS as usize;
    let fraction = format!("{fraction:0width$}");
    format!("{sign}{grouped},{}", fraction.trim_end_matches('0'))
}
