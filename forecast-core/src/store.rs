use serde::Serialize;

use crate::location::{Location, LocationErrors, LocationInput, check_duplicate_name};

/// Ordered list of accepted locations with unique names.
///
/// Both mutating operations leave `self` untouched and hand back a new list,
/// so a caller can keep the previous value around.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LocationList {
    entries: Vec<Location>,
}

impl LocationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `input` and append it if every check passes.
    ///
    /// The duplicate-name check only runs when the name itself is valid.
    /// On any failure the returned list equals `self`.
    pub fn add(&self, input: LocationInput) -> (LocationList, LocationErrors) {
        let mut errors = input.validate();
        if errors.name.is_none() {
            errors.name = check_duplicate_name(&self.entries, &input.name).err();
        }

        if !errors.is_valid() {
            tracing::debug!(name = %input.name, ?errors, "location rejected");
            return (self.clone(), errors);
        }

        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.extend(self.entries.iter().cloned());
        entries.push(Location::new(input.name, input.lat, input.lon));

        (Self { entries }, errors)
    }

    /// Drop the entry called `name`. Unknown names are a silent no-op.
    pub fn remove(&self, name: &str) -> LocationList {
        let Some(index) = self.entries.iter().position(|loc| loc.name() == name) else {
            return self.clone();
        };

        let entries = self
            .entries
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, loc)| loc.clone())
            .collect();

        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&Location> {
        self.entries.iter().find(|loc| loc.name() == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Location> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Location] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a LocationList {
    type Item = &'a Location;
    type IntoIter = std::slice::Iter<'a, Location>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
