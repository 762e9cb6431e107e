//! History entry record, draft, and source variant types.

use serde::{Deserialize, Serialize};

use crate::{
    core::convert::{ConversionInput, ConversionResult, composite_total_sqm, convert_area},
    types::{AreaUnit, HistoryId, SourcePage},
};

/// Raw 7/12 field text exactly as the user typed it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CompositeInput {
    /// Hectare field.
    pub hectare: String,
    /// Are field.
    pub are: String,
    /// Square meter field.
    pub sqm: String,
}

impl CompositeInput {
    /// Builds a triple from borrowed field text.
    pub fn new(hectare: &str, are: &str, sqm: &str) -> Self {
        Self {
            hectare: hectare.to_string(),
            are: are.to_string(),
            sqm: sqm.to_string(),
        }
    }

    /// Total area of the triple in square meters.
    pub fn total_sqm(&self) -> f64 {
        composite_total_sqm(&self.hectare, &self.are, &self.sqm)
    }
}

/// View that produced an entry, with the data only that view carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "sourcePage", rename_all = "kebab-case")]
pub enum EntrySource {
    /// Single-value converter.
    Home,
    /// Composite 7/12 entry.
    SevenTwelve {
        /// Raw sub-inputs.
        #[serde(rename = "sevenTwelveInput")]
        raw: CompositeInput,
    },
}

impl EntrySource {
    /// Page tag of this source.
    pub fn page(&self) -> SourcePage {
        match self {
            Self::Home => SourcePage::Home,
            Self::SevenTwelve { .. } => SourcePage::SevenTwelve,
        }
    }
}

/// One recorded conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Unique creation token.
    pub id: HistoryId,
    /// Input as converted.
    pub input: ConversionInput,
    /// Conversion output.
    pub result: ConversionResult,
    /// Originating view.
    #[serde(flatten)]
    pub source: EntrySource,
}

impl HistoryItem {
    /// Page tag of the originating view.
    pub fn page(&self) -> SourcePage {
        self.source.page()
    }

    /// True when `draft` would duplicate this entry.
    ///
    /// Home entries compare unit and value; composite entries compare the raw
    /// field text, so `"1"` and `"1.0"` are distinct.
    pub fn matches(&self, draft: &HistoryDraft) -> bool {
        match (&self.source, &draft.source) {
            (EntrySource::Home, EntrySource::Home) => {
                self.input.unit == draft.input.unit && self.input.value == draft.input.value
            }
            (EntrySource::SevenTwelve { raw: a }, EntrySource::SevenTwelve { raw: b }) => a == b,
            _ => false,
        }
    }
}

/// Candidate entry before the log assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryDraft {
    /// Input as converted.
    pub input: ConversionInput,
    /// Conversion output.
    pub result: ConversionResult,
    /// Originating view.
    pub source: EntrySource,
}

impl HistoryDraft {
    /// Draft for the single-value converter.
    pub fn home(input: ConversionInput) -> Self {
        Self {
            input,
            result: convert_area(input),
            source: EntrySource::Home,
        }
    }

    /// Draft for the composite view; input is the total in square meters.
    pub fn seven_twelve(raw: CompositeInput) -> Self {
        let input = ConversionInput::new(raw.total_sqm(), AreaUnit::Sqm);
        Self {
            input,
            result: convert_area(input),
            source: EntrySource::SevenTwelve { raw },
        }
    }

    /// Page tag of the originating view.
    pub fn page(&self) -> SourcePage {
        self.source.page()
    }
}
