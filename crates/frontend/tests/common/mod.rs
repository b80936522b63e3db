#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use api_types::{category::Category, entry::Entry};
use frontend::{Resource, ResourceService, ServiceError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    GetAll,
    GetById(i64),
    Create,
    Update(Option<i64>),
    Delete(i64),
}

struct State<T> {
    items: Vec<T>,
    calls: Vec<Call>,
    next_id: i64,
    failure: Option<(u16, String)>,
}

/// In-memory service recording every call.
#[derive(Clone)]
pub struct FakeService<T> {
    state: Arc<Mutex<State<T>>>,
    assign_id: fn(&mut T, i64),
}

impl FakeService<Category> {
    pub fn categories(items: Vec<Category>) -> Self {
        Self::new(items, |category, id| category.id = Some(id))
    }
}

impl FakeService<Entry> {
    pub fn entries(items: Vec<Entry>) -> Self {
        Self::new(items, |entry, id| entry.id = Some(id))
    }
}

impl<T: Resource> FakeService<T> {
    fn new(items: Vec<T>, assign_id: fn(&mut T, i64)) -> Self {
        let next_id = items.iter().filter_map(Resource::id).max().unwrap_or(0) + 1;
        Self {
            state: Arc::new(Mutex::new(State {
                items,
                calls: Vec::new(),
                next_id,
                failure: None,
            })),
            assign_id,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap()
    }

    /// Every following call fails with `status` and `body`.
    pub fn fail_with(&self, status: u16, body: &str) {
        self.lock().failure = Some((status, body.to_string()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn count(&self, call: fn(&Call) -> bool) -> usize {
        self.lock().calls.iter().filter(|c| call(c)).count()
    }

    pub fn items(&self) -> Vec<T> {
        self.lock().items.clone()
    }

    fn record(&self, call: Call) -> Result<(), ServiceError> {
        let mut state = self.lock();
        state.calls.push(call);
        match &state.failure {
            Some((status, body)) => Err(ServiceError::Status {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn not_found() -> ServiceError {
    ServiceError::Status {
        status: 404,
        body: String::new(),
    }
}

impl<T: Resource> ResourceService<T> for FakeService<T> {
    async fn get_all(&self) -> Result<Vec<T>, ServiceError> {
        self.record(Call::GetAll)?;
        Ok(self.items())
    }

    async fn get_by_id(&self, id: i64) -> Result<T, ServiceError> {
        self.record(Call::GetById(id))?;
        self.lock()
            .items
            .iter()
            .find(|item| item.id() == Some(id))
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create(&self, mut resource: T) -> Result<T, ServiceError> {
        self.record(Call::Create)?;
        let mut state = self.lock();
        let id = state.next_id;
        state.next_id += 1;
        (self.assign_id)(&mut resource, id);
        state.items.push(resource.clone());
        Ok(resource)
    }

    async fn update(&self, resource: T) -> Result<T, ServiceError> {
        self.record(Call::Update(resource.id()))?;
        let id = resource.id().ok_or(ServiceError::MissingId)?;
        let mut state = self.lock();
        let slot = state
            .items
            .iter_mut()
            .find(|item| item.id() == Some(id))
            .ok_or_else(not_found)?;
        *slot = resource.clone();
        Ok(resource)
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.record(Call::Delete(id))?;
        self.lock().items.retain(|item| item.id() != Some(id));
        Ok(())
    }
}
