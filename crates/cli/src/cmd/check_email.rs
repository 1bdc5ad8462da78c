//! Email shape check

use anyhow::Result;
use owo_colors::OwoColorize;

pub async fn run(addresses: &[String]) -> Result<()> {
    let mut invalid = 0;

    for address in addresses {
        if utils::is_valid_email(address) {
            println!("{} {}", "valid  ".green(), address);
        } else {
            invalid += 1;
            println!("{} {}", "invalid".red(), address);
        }
    }

    if invalid > 0 {
        anyhow::bail!("{} of {} addresses are invalid", invalid, addresses.len());
    }
    Ok(())
}
