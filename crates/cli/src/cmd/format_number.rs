//! Thousands grouping for numbers given on the command line

use anyhow::Result;

pub async fn run(values: &[String]) -> Result<()> {
    for value in values {
        if value.parse::<f64>().is_err() {
            anyhow::bail!("Not a number: '{}'", value);
        }
        // Group the text as typed so large integers keep every digit
        println!("{}", utils::format_number_str(value));
    }
    Ok(())
}
