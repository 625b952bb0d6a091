use super::ui;
use crate::core::cache::RateCache;
use crate::core::currency::RateSnapshot;
use anyhow::{Context, Result};
use comfy_table::Cell;

/// Loads today's table and prints it.
pub async fn run(cache: &RateCache, base_currency: &str) -> Result<()> {
    cache
        .try_refresh()
        .await
        .context("Could not load exchange rates")?;
    let snapshot = cache.snapshot().await;
    println!("{}", render_rates(&snapshot, base_currency));
    Ok(())
}

pub fn render_rates(snapshot: &RateSnapshot, base_currency: &str) -> String {
    let base_currency = base_currency.to_uppercase();
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Rate ({base_currency})")),
    ]);

    let mut shown = 0;
    for (code, rate) in snapshot.rates.iter() {
        if code == base_currency {
            continue;
        }
        table.add_row(vec![Cell::new(code), ui::rate_cell(rate)]);
        shown += 1;
    }

    let title = format!(
        "Exchange rates valid for {}",
        snapshot.effective_date.format("%d.%m.%Y")
    );
    format!(
        "{}\n\n{}\n{}",
        ui::style_text(&title, ui::StyleType::Title),
        table,
        ui::style_text(
            &format!("{shown} currencies"),
            ui::StyleType::Subtle
        )
    )
}
