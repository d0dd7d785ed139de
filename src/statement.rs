use crate::aggregator::WeekTrips;
use crate::ledger::{Ledger, MonthlyFee};
use crate::models::{Config, collation_key};
use crate::week::Week;
use tracing::warn;

/// Builds the copy-pasteable weekly statement. Pure function of its
/// inputs: identical inputs yield byte-identical text.
pub fn build_statement(
    week: &Week,
    trips: &WeekTrips,
    config: &Config,
    fee: Option<&MonthlyFee>,
) -> String {
    let mut ledger = Ledger::default();
    for logged in trips.logged() {
        match config.car(&logged.car_id) {
            Some(car) => ledger.charge_trip(car, &logged.trip),
            None => warn!(car_id = %logged.car_id, "trip references unknown car, skipped"),
        }
    }
    if let Some(fee) = fee {
        ledger.charge_monthly_fee(fee);
    }
    ledger.net();

    let mut lines = vec![format!("Carona {}", week.label())];
    if let Some(fee) = fee {
        lines.push(format!(
            "Estacionamento: {:.2} por pessoa para {}",
            fee.amount_per_person,
            config.display_name(&fee.payee_id)
        ));
    }
    lines.push(String::new());

    let mut rows: Vec<(String, String, String)> = ledger
        .iter()
        .map(|(payer, payees)| {
            let payer_name = config.display_name(payer);
            let mut parts: Vec<(String, String, f64)> = payees
                .iter()
                .map(|(payee, amount)| {
                    let name = config.display_name(payee);
                    (collation_key(&name), name, *amount)
                })
                .collect();
            parts.sort_by(|l, r| l.0.cmp(&r.0).then_with(|| l.1.cmp(&r.1)));
            let joined = parts
                .iter()
                .map(|(_, name, amount)| format!("{amount:.2} to {name}"))
                .collect::<Vec<_>>()
                .join(", ");
            (
                collation_key(&payer_name),
                payer_name.clone(),
                format!("{payer_name}: {joined}"),
            )
        })
        .collect();
    rows.sort_by(|l, r| l.0.cmp(&r.0).then_with(|| l.1.cmp(&r.1)));
    lines.extend(rows.into_iter().map(|(_, _, line)| line));

    lines.join("\n")
}
