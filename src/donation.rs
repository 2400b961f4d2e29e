//! Donation request validation
//!
//! The game never signs or submits anything. This module only decides
//! whether a user-entered amount can be handed to the wallet's signing
//! provider, and converts it to wei. Game state is never touched here.
//!
//! The browser build exports this check to the page as `validateDonation`.

use std::fmt;

use thiserror::Error;

/// Fixed recipient of donations (Base network)
pub const DONATION_RECIPIENT: &str = "0x96eF7ba758adDd3ba0FA46036E4eeaD4685f31Ee";

/// Decimal places of one ether
pub const ETHER_DECIMALS: usize = 18;

const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

/// Rejections shown to the user as-is
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DonationError {
    #[error("Please connect your wallet first!")]
    NotConnected,

    #[error("Please enter a valid amount")]
    InvalidAmount,

    #[error("Please enter an amount greater than zero")]
    NonPositive,

    #[error("Amount has more than {} decimal places", ETHER_DECIMALS)]
    TooPrecise,

    #[error("Amount is too large")]
    TooLarge,
}

/// A validated donation, ready for an external signing provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationRequest {
    pub recipient: &'static str,
    pub amount_wei: u128,
}

impl DonationRequest {
    /// Validate a user-entered ETH amount
    ///
    /// The wallet check comes first, matching what the user sees.
    pub fn new(amount: &str, wallet_connected: bool) -> Result<Self, DonationError> {
        if !wallet_connected {
            return Err(DonationError::NotConnected);
        }
        let amount_wei = parse_ether(amount)?;
        if amount_wei == 0 {
            return Err(DonationError::NonPositive);
        }
        Ok(Self {
            recipient: DONATION_RECIPIENT,
            amount_wei,
        })
    }
}

impl fmt::Display for DonationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ETH to {}",
            format_ether(self.amount_wei),
            truncate_address(self.recipient)
        )
    }
}

/// Parse a decimal ETH amount into wei without going through floats
///
/// Negative amounts are reported as [`DonationError::NonPositive`].
pub fn parse_ether(amount: &str) -> Result<u128, DonationError> {
    let amount = amount.trim();
    let (negative, digits) = match amount.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, amount),
    };

    let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
        return Err(DonationError::InvalidAmount);
    }
    if frac.len() > ETHER_DECIMALS {
        return Err(DonationError::TooPrecise);
    }

    let whole_wei = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u128>()
            .ok()
            .and_then(|w| w.checked_mul(WEI_PER_ETHER))
            .ok_or(DonationError::TooLarge)?
    };
    let frac_wei = if frac.is_empty() {
        0
    } else {
        // Right-pad to 18 digits: "25" -> 250000000000000000
        format!("{:0<width$}", frac, width = ETHER_DECIMALS)
            .parse::<u128>()
            .map_err(|_| DonationError::InvalidAmount)?
    };
    let wei = whole_wei
        .checked_add(frac_wei)
        .ok_or(DonationError::TooLarge)?;

    if negative && wei > 0 {
        return Err(DonationError::NonPositive);
    }
    Ok(wei)
}

/// Format wei as a decimal ETH string with trailing zeros removed
pub fn format_ether(wei: u128) -> String {
    let whole = wei / WEI_PER_ETHER;
    let frac = wei % WEI_PER_ETHER;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0>width$}", frac, width = ETHER_DECIMALS);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

/// Shorten an address for display: `0x96eF...31Ee`
pub fn truncate_address(address: &str) -> String {
    if address.len() <= 10 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}
