//! Input views: single-value converter and composite 7/12 entry. The
//! calculator keypad lives in [`crate::calc::keypad`] and keeps no history.
//!
//! Each view owns its raw field text and one [`Debouncer`]. Every accepted
//! edit reschedules a history record for the value currently on screen; a
//! value only reaches the history once it has been left alone for the
//! debounce delay. Dropping a view, or calling `teardown`, cancels any
//! pending record.

/// Result and history entry rendering.
pub mod display;
/// Numeric field filtering.
pub mod input;

use tokio::time::Duration;

use crate::{
    config::Config,
    core::convert::{ConversionInput, ConversionResult, convert_area},
    entry::{CompositeInput, HistoryDraft, HistoryItem},
    runtime::{
        debounce::Debouncer,
        handle::{HistoryHandle, RuntimeError},
    },
    types::{AreaUnit, SourcePage},
};

use self::input::{is_bounded_numeric_text, is_numeric_text, parse_positive};

/// Default integer-digit bound for composite fields.
pub const DEFAULT_MAX_INTEGER_DIGITS: usize = 4;

/// Single value plus unit selector.
pub struct ConverterView {
    value: String,
    unit: AreaUnit,
    history: HistoryHandle,
    debounce: Debouncer,
}

impl ConverterView {
    pub fn new(history: HistoryHandle, debounce: Duration) -> Self {
        Self {
            value: String::new(),
            unit: AreaUnit::Hectare,
            history,
            debounce: Debouncer::new(debounce),
        }
    }

    /// Converter using the configured debounce delay.
    pub fn from_config(history: HistoryHandle, config: &Config) -> Self {
        Self::new(history, config.debounce())
    }

    /// Replaces the field text. Rejected edits leave the field unchanged.
    pub fn set_value(&mut self, text: &str) -> bool {
        if !is_numeric_text(text) {
            return false;
        }
        self.value = text.to_string();
        self.reschedule();
        true
    }

    pub fn set_unit(&mut self, unit: AreaUnit) {
        self.unit = unit;
        self.reschedule();
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn unit(&self) -> AreaUnit {
        self.unit
    }

    /// Current input, when the field holds a positive number.
    pub fn input(&self) -> Option<ConversionInput> {
        parse_positive(&self.value).map(|value| ConversionInput::new(value, self.unit))
    }

    pub fn result(&self) -> Option<ConversionResult> {
        self.input().map(convert_area)
    }

    pub fn has_pending_record(&self) -> bool {
        self.debounce.is_pending()
    }

    pub fn debounce_delay(&self) -> Duration {
        self.debounce.delay()
    }

    pub async fn history(&self) -> Result<Vec<HistoryItem>, RuntimeError> {
        self.history.for_page(SourcePage::Home).await
    }

    pub async fn clear_history(&self) -> Result<usize, RuntimeError> {
        self.history.clear(SourcePage::Home).await
    }

    pub fn teardown(&mut self) {
        self.debounce.cancel();
    }

    fn reschedule(&mut self) {
        match self.input() {
            Some(input) => schedule_record(&mut self.debounce, &self.history, HistoryDraft::home(input)),
            None => self.debounce.cancel(),
        }
    }
}

/// Hectare/are/sqm fields copied from a 7/12 extract.
pub struct SevenTwelveView {
    fields: CompositeInput,
    max_integer_digits: usize,
    history: HistoryHandle,
    debounce: Debouncer,
}

/// Field of the composite view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeField {
    /// Hectare.
    Hectare,
    /// Are.
    Are,
    /// Square meters.
    Sqm,
}

impl SevenTwelveView {
    pub fn new(history: HistoryHandle, debounce: Duration, max_integer_digits: usize) -> Self {
        Self {
            fields: CompositeInput::default(),
            max_integer_digits,
            history,
            debounce: Debouncer::new(debounce),
        }
    }

    /// Composite view using the configured debounce delay and digit bound.
    pub fn from_config(history: HistoryHandle, config: &Config) -> Self {
        Self::new(history, config.debounce(), config.input.max_integer_digits)
    }

    /// Replaces one field's text. Rejected edits leave the field unchanged.
    pub fn set_field(&mut self, field: CompositeField, text: &str) -> bool {
        if !is_bounded_numeric_text(text, self.max_integer_digits) {
            return false;
        }
        let slot = match field {
            CompositeField::Hectare => &mut self.fields.hectare,
            CompositeField::Are => &mut self.fields.are,
            CompositeField::Sqm => &mut self.fields.sqm,
        };
        *slot = text.to_string();
        self.reschedule();
        true
    }

    pub fn fields(&self) -> &CompositeInput {
        &self.fields
    }

    pub fn max_integer_digits(&self) -> usize {
        self.max_integer_digits
    }

    pub fn total_sqm(&self) -> f64 {
        self.fields.total_sqm()
    }

    pub fn result(&self) -> Option<ConversionResult> {
        let total = self.total_sqm();
        (total > 0.0).then(|| convert_area(ConversionInput::new(total, AreaUnit::Sqm)))
    }

    pub fn has_pending_record(&self) -> bool {
        self.debounce.is_pending()
    }

    pub fn debounce_delay(&self) -> Duration {
        self.debounce.delay()
    }

    pub async fn history(&self) -> Result<Vec<HistoryItem>, RuntimeError> {
        self.history.for_page(SourcePage::SevenTwelve).await
    }

    pub async fn clear_history(&self) -> Result<usize, RuntimeError> {
        self.history.clear(SourcePage::SevenTwelve).await
    }

    pub fn teardown(&mut self) {
        self.debounce.cancel();
    }

    fn reschedule(&mut self) {
        if self.total_sqm() > 0.0 {
            let draft = HistoryDraft::seven_twelve(self.fields.clone());
            schedule_record(&mut self.debounce, &self.history, draft);
        } else {
            self.debounce.cancel();
        }
    }
}

fn schedule_record(debounce: &mut Debouncer, history: &HistoryHandle, draft: HistoryDraft) {
    let history = history.clone();
    debounce.schedule(async move {
        if let Err(err) = history.record(draft).await {
            tracing::warn!("debounced history record dropped: {err}");
        }
    });
}
