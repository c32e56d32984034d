use crate::coerce::{FieldKind, Value};
use crate::field::{FieldDescriptor, FieldSlot, Record};

/// A field of a [`DynamicRecord`] and the last value written to it.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicField {
    pub name: String,
    pub kind: FieldKind,
    pub value: Option<Value>,
}

impl FieldSlot for DynamicField {
    fn kind(&self) -> FieldKind {
        self.kind.clone()
    }

    fn assign(&mut self, value: Value) -> bool {
        if !fits(&self.kind, &value) {
            return false;
        }
        self.value = Some(value);
        true
    }
}

fn fits(kind: &FieldKind, value: &Value) -> bool {
    match (kind, value) {
        (FieldKind::Bool, Value::Bool(_))
        | (FieldKind::Int(_), Value::Int(_))
        | (FieldKind::Uint(_), Value::Uint(_))
        | (FieldKind::Float(_), Value::Float(_))
        | (FieldKind::Text, Value::Text(_)) => true,
        (FieldKind::Sequence(element), Value::Sequence(items)) => {
            items.iter().all(|item| fits(element, item))
        }
        _ => false,
    }
}

/// A record whose fields are declared at runtime.
#[derive(Debug, Clone, Default)]
pub struct DynamicRecord {
    fields: Vec<DynamicField>,
}

impl DynamicRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field, replacing any earlier declaration with the same name.
    pub fn declare(&mut self, name: impl Into<String>, kind: FieldKind) -> &mut Self {
        let name = name.into();
        self.fields.retain(|f| f.name != name);
        self.fields.push(DynamicField {
            name,
            kind,
            value: None,
        });
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .and_then(|f| f.value.as_ref())
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &DynamicField> {
        self.fields.iter()
    }
}

impl Record for DynamicRecord {
    fn slot(&mut self, name: &str) -> Option<&mut dyn FieldSlot> {
        self.fields
            .iter_mut()
            .find(|f| f.name == name)
            .map(|f| f as &mut dyn FieldSlot)
    }

    fn fields(&self) -> Vec<FieldDescriptor> {
        self.fields
            .iter()
            .map(|f| FieldDescriptor::new(f.name.clone(), f.kind.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_fields_accept_matching_values() {
        let mut record = DynamicRecord::new();
        record
            .declare("Port", FieldKind::Uint(16))
            .declare("Hosts", FieldKind::sequence_of(FieldKind::Text));

        let port = record.slot("Port").expect("port declared");
        assert!(port.assign(Value::Uint(7171)));
        assert!(!port.assign(Value::Text("7171".to_string())));
        assert_eq!(record.get("Port"), Some(&Value::Uint(7171)));

        let hosts = record.slot("Hosts").expect("hosts declared");
        assert!(!hosts.assign(Value::Sequence(vec![Value::Int(1)])));
        assert_eq!(record.get("Hosts"), None);
        assert!(record.slot("Missing").is_none());
    }

    #[test]
    fn redeclaring_replaces_the_field() {
        let mut record = DynamicRecord::new();
        record
            .declare("A", FieldKind::Bool)
            .declare("B", FieldKind::Text)
            .declare("A", FieldKind::Int(32));

        let fields = record.fields();
        assert_eq!(
            fields,
            vec![
                FieldDescriptor::new("B", FieldKind::Text),
                FieldDescriptor::new("A", FieldKind::Int(32)),
            ]
        );
    }
}
