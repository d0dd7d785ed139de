use crate::models::{Car, Trip};
use std::collections::{BTreeMap, BTreeSet};

/// Round-half-up at 2 decimals. The epsilon pulls values sitting just
/// below a half-cent boundary due to binary representation (e.g.
/// 0.014999999...) onto the intended side.
pub fn round_money(value: f64) -> f64 {
    ((value + 1e-9) * 100.0).round() / 100.0
}

/// A fixed per-person charge owed by each payer to a single payee,
/// folded into the same ledger as the trip fares so it nets against them.
/// Whether a given week qualifies is the caller's decision.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyFee {
    pub amount_per_person: f64,
    pub payer_ids: Vec<String>,
    pub payee_id: String,
}

/// Pairwise owed amounts, payer -> payee -> amount. Amounts stay
/// unrounded while charges accumulate; `net` rounds and collapses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    debts: BTreeMap<String, BTreeMap<String, f64>>,
}

impl Ledger {
    /// Accumulates a debt. Self-debts and non-positive amounts are
    /// dropped, so malformed fares contribute nothing.
    pub fn add(&mut self, payer: &str, payee: &str, amount: f64) {
        if payer == payee || amount <= 0.0 {
            return;
        }
        *self
            .debts
            .entry(payer.to_string())
            .or_default()
            .entry(payee.to_string())
            .or_insert(0.0) += amount;
    }

    pub fn charge_trip(&mut self, car: &Car, trip: &Trip) {
        self.charge_leg(car, &trip.went, car.fare_go);
        self.charge_leg(car, &trip.returned, car.fare_return);
    }

    fn charge_leg(&mut self, car: &Car, riders: &BTreeSet<String>, fare: f64) {
        // The empty-set check is what keeps fare / 0 from ever running.
        if fare <= 0.0 || riders.is_empty() {
            return;
        }
        let share = fare / riders.len() as f64;
        for rider in riders {
            self.add(rider, &car.driver_person_id, share);
        }
    }

    pub fn charge_monthly_fee(&mut self, fee: &MonthlyFee) {
        for payer in &fee.payer_ids {
            self.add(payer, &fee.payee_id, fee.amount_per_person);
        }
    }

    /// Collapses every pair with debt in either direction into at most
    /// one net transfer, rounded to cents. Pairs that cancel exactly
    /// disappear, as does any payer left without payees.
    pub fn net(&mut self) {
        let mut pairs = BTreeSet::new();
        for (payer, payees) in &self.debts {
            for payee in payees.keys() {
                let pair = if payer < payee {
                    (payer.clone(), payee.clone())
                } else {
                    (payee.clone(), payer.clone())
                };
                pairs.insert(pair);
            }
        }

        let mut netted: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for (a, b) in pairs {
            let ab = self.raw_amount(&a, &b);
            let ba = self.raw_amount(&b, &a);
            let (payer, payee, owed) = if ab >= ba {
                (a, b, ab - ba)
            } else {
                (b, a, ba - ab)
            };
            let owed = round_money(owed);
            if owed >= 0.01 {
                netted.entry(payer).or_default().insert(payee, owed);
            }
        }
        self.debts = netted;
    }

    pub fn amount(&self, payer: &str, payee: &str) -> Option<f64> {
        self.debts.get(payer)?.get(payee).copied()
    }

    fn raw_amount(&self, payer: &str, payee: &str) -> f64 {
        self.amount(payer, payee).unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.debts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, f64>)> {
        self.debts.iter()
    }
}
