mod common;
mod payout_factor;
