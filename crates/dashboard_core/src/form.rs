use thiserror::Error;

use crate::{Request, RequestId};

/// Fields every request must carry before it can be sent.
pub const REQUIRED_FIELDS: [&str; 4] = ["description", "sim_lead", "detector", "source"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill in the {0} field")]
    MissingField(&'static str),
}

/// Whether a form creates a new request or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormTarget {
    #[default]
    New,
    Edit(RequestId),
}

/// Draft of the request form as ordered name/value pairs.
///
/// Names may repeat (one `selected_macros` entry per macro), mirroring how a
/// serialized HTML form is posted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestForm {
    pub target: FormTarget,
    fields: Vec<(String, String)>,
}

impl RequestForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// New-request draft prefilled from an existing request.
    pub fn copy_of(request: &Request) -> Self {
        let mut form = Self::new();
        form.prefill(request);
        form
    }

    /// Draft that edits `request` in place.
    pub fn edit_of(request: &Request) -> Self {
        let mut form = Self {
            target: FormTarget::Edit(request.id),
            fields: Vec::new(),
        };
        form.prefill(request);
        form
    }

    fn prefill(&mut self, request: &Request) {
        self.set("description", &request.description);
        self.set("sim_lead", &request.sim_lead);
        if let Some(detector) = &request.detector {
            self.set("detector", detector);
        }
        if let Some(source) = &request.source {
            self.set("source", source);
        }
    }

    /// Replaces the first value named `name`, or appends it.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.fields.iter_mut().find(|(field, _)| field == name) {
            Some((_, current)) => *current = value.to_string(),
            None => self.push(name, value),
        }
    }

    /// Appends another value under `name`.
    pub fn push(&mut self, name: &str, value: &str) {
        self.fields.push((name.to_string(), value.to_string()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn validate(&self) -> Result<(), FormError> {
        for required in REQUIRED_FIELDS {
            let filled = self
                .get(required)
                .is_some_and(|value| !value.trim().is_empty());
            if !filled {
                return Err(FormError::MissingField(required));
            }
        }
        Ok(())
    }

    /// Pairs to send: everything for a new request, only the editable
    /// columns for an edit.
    pub fn payload(&self) -> Vec<(String, String)> {
        match self.target {
            FormTarget::New => self.fields.clone(),
            FormTarget::Edit(_) => self
                .fields
                .iter()
                .filter(|(name, _)| REQUIRED_FIELDS.contains(&name.as_str()))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RequestStatus;

    fn request() -> Request {
        Request {
            id: 9,
            status: RequestStatus::Approved,
            description: "Background sim".to_string(),
            requester: None,
            sim_lead: "A. Lead".to_string(),
            request_date: "01/02/2017".to_string(),
            detector: Some("LZ".to_string()),
            source: Some("Rn222".to_string()),
        }
    }

    #[test]
    fn blank_required_field_is_rejected() {
        let mut form = RequestForm::copy_of(&request());
        form.set("sim_lead", "   ");
        assert_eq!(form.validate(), Err(FormError::MissingField("sim_lead")));
    }

    #[test]
    fn repeated_names_are_kept_in_order() {
        let mut form = RequestForm::copy_of(&request());
        form.push("selected_macros", "a.mac 10 100 1");
        form.push("selected_macros", "b.mac 5 50 2");
        let macros: Vec<_> = form
            .fields()
            .iter()
            .filter(|(name, _)| name == "selected_macros")
            .map(|(_, value)| value.as_str())
            .collect();
        assert_eq!(macros, vec!["a.mac 10 100 1", "b.mac 5 50 2"]);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn edit_payload_only_carries_editable_columns() {
        let mut form = RequestForm::edit_of(&request());
        form.set("app", "BACCARAT");
        let names: Vec<_> = form.payload().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["description", "sim_lead", "detector", "source"]);
        assert_eq!(form.target, FormTarget::Edit(9));
    }
}
