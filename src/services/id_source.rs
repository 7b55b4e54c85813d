use uuid::Uuid;

/// Supplies workout ids. A source never hands out the same id twice.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Monotonic counter ids (`<prefix>-1`, `<prefix>-2`, ...), reproducible
/// across runs.
///
/// The counter lives in the instance, so two sources with the same prefix
/// repeat each other's ids. Services that write into the same plan must
/// share one source: hand the generator's over with
/// [`PlanGenerationService::into_ids`](super::PlanGenerationService::into_ids),
/// or give each source its own prefix.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("w")
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

impl<T: IdSource + ?Sized> IdSource for &mut T {
    fn next_id(&mut self) -> String {
        (**self).next_id()
    }
}
