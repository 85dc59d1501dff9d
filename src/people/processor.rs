use clap::ValueEnum;
use log::{debug, info};

use crate::core::item::{ItemProcessor, ItemProcessorResult};

use super::records::{PersonIn, PersonOut};

/// Case mapping applied to names.
///
/// Neither mapping depends on the process locale, so the same input always
/// gives the same output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CaseMapping {
    /// Only `a`-`z` are uppercased; every other character is kept as is.
    #[default]
    Ascii,
    /// Full Unicode uppercase mapping, `ß` becomes `SS`.
    Unicode,
}

impl CaseMapping {
    pub fn apply(&self, value: &str) -> String {
        match self {
            CaseMapping::Ascii => value.to_ascii_uppercase(),
            CaseMapping::Unicode => value.to_uppercase(),
        }
    }
}

/// Uppercases the first and last name of every person.
///
/// Several processors can take part in the same job; each one logs under its
/// own name.
pub struct PersonItemProcessor {
    name: String,
    case_mapping: CaseMapping,
}

impl PersonItemProcessor {
    pub fn new(name: &str, case_mapping: CaseMapping) -> Self {
        info!("Creating processor {} ({:?} case mapping)", name, case_mapping);
        Self {
            name: name.to_string(),
            case_mapping,
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }
}

impl ItemProcessor<PersonIn, PersonOut> for PersonItemProcessor {
    fn process(&self, item: &PersonIn) -> ItemProcessorResult<PersonOut> {
        let transformed = PersonOut::new(
            self.case_mapping.apply(&item.first_name),
            self.case_mapping.apply(&item.last_name),
        );

        debug!(
            "Processor {}: converting ({}) into ({})",
            self.name, item, transformed
        );

        Ok(Some(transformed))
    }
}

#[cfg(test)]
mod tests {
    use crate::core::item::ItemProcessor;
    use crate::people::records::{PersonIn, PersonOut};

    use super::{CaseMapping, PersonItemProcessor};

    fn person(first_name: &str, last_name: &str) -> PersonIn {
        PersonIn {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        }
    }

    #[test]
    fn both_names_are_uppercased() {
        let processor = PersonItemProcessor::new("ip1", CaseMapping::Ascii);

        let processed = processor.process(&person("Jill", "Doe")).unwrap();

        assert_eq!(processed, Some(PersonOut::new("JILL", "DOE")));
    }

    #[test]
    fn ascii_mapping_leaves_other_letters_alone() {
        let processor = PersonItemProcessor::new("ip1", CaseMapping::Ascii);

        let processed = processor.process(&person("léa", "straße")).unwrap();

        assert_eq!(processed, Some(PersonOut::new("LéA", "STRAßE")));
    }

    #[test]
    fn unicode_mapping_is_not_locale_dependent() {
        let processor = PersonItemProcessor::new("ip2", CaseMapping::Unicode);

        // A Turkish locale would give "İ"; the mapping must not.
        let processed = processor.process(&person("iris", "straße")).unwrap();

        assert_eq!(processed, Some(PersonOut::new("IRIS", "STRASSE")));
        assert_eq!(processor.get_name(), "ip2");
    }

    #[test]
    fn already_uppercase_names_are_unchanged() {
        for case_mapping in [CaseMapping::Ascii, CaseMapping::Unicode] {
            let processor = PersonItemProcessor::new("ip", case_mapping);

            let processed = processor.process(&person("JOE", "SMITH")).unwrap();

            assert_eq!(processed, Some(PersonOut::new("JOE", "SMITH")));
        }
    }
}
