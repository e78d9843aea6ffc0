//! Form declarations: the field table and its partition into steps

use super::error::{FormError, SchemaError};
use super::field::{FieldKind, FieldSpec};
use std::collections::HashMap;

/// An ordered group of fields shown together before the user advances
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSpec {
    pub index: usize,
    pub fields: Vec<String>,
}

/// A validated form declaration
///
/// Field names are unique, every field sits in exactly one step, and step
/// indices run contiguously from 0. A schema that breaks any of these is
/// rejected by the constructors, so the controller never sees one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    id: String,
    title: String,
    fields: Vec<FieldSpec>,
    steps: Vec<StepSpec>,
}

impl FormSchema {
    /// Build a multi-step form; each inner vector becomes one step
    pub fn new(id: &str, title: &str, steps: Vec<Vec<FieldSpec>>) -> Result<Self, SchemaError> {
        let mut fields = Vec::new();
        let mut step_specs = Vec::with_capacity(steps.len());
        for (index, step) in steps.into_iter().enumerate() {
            step_specs.push(StepSpec {
                index,
                fields: step.iter().map(|f| f.name.clone()).collect(),
            });
            fields.extend(step);
        }
        Self::from_parts(id, title, fields, step_specs)
    }

    /// Build a flat form with every field in step 0
    pub fn single_step(id: &str, title: &str, fields: Vec<FieldSpec>) -> Result<Self, SchemaError> {
        Self::new(id, title, vec![fields])
    }

    /// Build from a field table and an explicit step layout
    ///
    /// Steps are renumbered by position, so `index` on the inputs is ignored.
    pub fn from_parts(
        id: &str,
        title: &str,
        fields: Vec<FieldSpec>,
        steps: Vec<StepSpec>,
    ) -> Result<Self, SchemaError> {
        if steps.is_empty() {
            return Err(SchemaError::NoSteps);
        }

        let mut placement: HashMap<&str, Option<usize>> = HashMap::new();
        for field in &fields {
            if placement.insert(field.name.as_str(), None).is_some() {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
            if field.kind == FieldKind::Select && field.allowed_values.is_empty() {
                return Err(SchemaError::EmptyChoices(field.name.clone()));
            }
        }

        for (index, step) in steps.iter().enumerate() {
            if step.fields.is_empty() {
                return Err(SchemaError::EmptyStep(index));
            }
            for name in &step.fields {
                match placement.get_mut(name.as_str()) {
                    None => {
                        return Err(SchemaError::UnknownStepField {
                            step: index,
                            field: name.clone(),
                        })
                    }
                    Some(Some(_)) => return Err(SchemaError::FieldInSeveralSteps(name.clone())),
                    Some(slot) => *slot = Some(index),
                }
            }
        }

        if let Some(field) = fields
            .iter()
            .find(|f| placement.get(f.name.as_str()).is_some_and(|slot| slot.is_none()))
        {
            return Err(SchemaError::UnassignedField(field.name.clone()));
        }

        let steps = steps
            .into_iter()
            .enumerate()
            .map(|(index, step)| StepSpec {
                index,
                fields: step.fields,
            })
            .collect();

        Ok(Self {
            id: id.to_string(),
            title: title.to_string(),
            fields,
            steps,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> &[StepSpec] {
        &self.steps
    }

    /// Every field in declaration order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields of one step, in step order
    pub fn fields_for_step(&self, index: usize) -> Result<Vec<&FieldSpec>, FormError> {
        let step = self.steps.get(index).ok_or(FormError::StepOutOfRange {
            index,
            count: self.steps.len(),
        })?;
        Ok(step
            .fields
            .iter()
            .filter_map(|name| self.field(name))
            .collect())
    }
}
