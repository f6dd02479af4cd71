use tabled::Table;

use crate::{error, info, management::MigrationLedger, types::LedgerTableRow, utils};

pub async fn info() {
    let ledger = match MigrationLedger::load(MigrationLedger::default_path()).await {
        Ok(ledger) => ledger,
        Err(e) => error!("Failed to load migration ledger: {:?}", e),
    };

    if ledger.records().is_empty() {
        info!("No playlists migrated yet.");
        return;
    }

    let rows: Vec<LedgerTableRow> = ledger
        .records()
        .values()
        .map(|record| {
            let matched = record
                .tracks
                .iter()
                .filter(|t| t.result.is_matched())
                .count();
            LedgerTableRow {
                playlist: record.name.clone(),
                matched,
                unmatched: record.tracks.len() - matched,
                last_migrated: utils::format_timestamp(record.last_migrated),
            }
        })
        .collect();

    let table = Table::new(rows);
    println!("{}", table);
}
