//! Validation check implementations

use std::collections::HashSet;

use super::{ConfigValidator, ValidationError, ValidationWarning};

impl<'a> ConfigValidator<'a> {
    /// At least one fragment is required
    pub(super) fn check_fragment_list(&mut self) {
        if self.config.fragments.is_empty() {
            self.result.add_error(ValidationError::MissingRequiredField {
                field: "fragments".to_string(),
            });
        }
    }

    /// Fragment names must be plain file names inside the source directory
    pub(super) fn check_fragment_names(&mut self) {
        for (index, name) in self.config.fragments.iter().enumerate() {
            let field = format!("fragments[{}]", index);
            if name.trim().is_empty() {
                self.result.add_error(ValidationError::InvalidValue {
                    field,
                    reason: "fragment name is empty".to_string(),
                });
            } else if name.contains('/') || name.contains('\\') {
                self.result.add_error(ValidationError::InvalidValue {
                    field,
                    reason: format!("'{}' must be a file name, not a path", name),
                });
            }
        }
    }

    /// Duplicates are allowed but concatenate the same content twice
    pub(super) fn check_duplicate_fragments(&mut self) {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut reported: HashSet<&str> = HashSet::new();

        for name in &self.config.fragments {
            if !seen.insert(name.as_str()) && reported.insert(name.as_str()) {
                self.result.add_warning(ValidationWarning::DuplicateFragment {
                    name: name.clone(),
                });
            }
        }
    }

    /// Both outputs need distinct, non-empty names
    pub(super) fn check_output_names(&mut self) {
        let outputs = [
            ("output_name", &self.config.output_name),
            ("minified_name", &self.config.minified_name),
        ];

        for (field, value) in outputs {
            if value.trim().is_empty() {
                self.result.add_error(ValidationError::MissingRequiredField {
                    field: field.to_string(),
                });
            }
        }

        if !self.config.output_name.is_empty()
            && self.config.output_name == self.config.minified_name
        {
            self.result.add_error(ValidationError::InvalidValue {
                field: "minified_name".to_string(),
                reason: format!(
                    "'{}' would overwrite the raw output",
                    self.config.minified_name
                ),
            });
        }
    }

    /// Fragments without the watched extension never trigger a rebuild
    pub(super) fn check_watched_extension(&mut self) {
        if self.config.extension.is_empty() {
            self.result.add_error(ValidationError::MissingRequiredField {
                field: "extension".to_string(),
            });
            return;
        }

        for name in &self.config.fragments {
            if !name.is_empty() && !self.config.is_stylesheet(name) {
                self.result
                    .add_warning(ValidationWarning::UnwatchedFragment {
                        name: name.clone(),
                        extension: self.config.extension.clone(),
                    });
            }
        }
    }
}
