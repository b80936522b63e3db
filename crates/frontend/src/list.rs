use crate::{
    controller::Effect,
    service::{Resource, ResourceService},
};

pub const DELETE_CONFIRMATION: &str = "Deseja realmente excluir este item?";
pub const DELETE_ERROR_MESSAGE: &str = "Erro ao tentar excluir!";
pub const LOAD_ERROR_MESSAGE: &str = "Erro ao carregar a lista.";

/// Items shown by a list page plus the selection cursor.
#[derive(Debug)]
pub struct ResourceList<T> {
    items: Vec<T>,
    selected: usize,
    error: Option<String>,
}

impl<T> Default for ResourceList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
            error: None,
        }
    }
}

impl<T: Resource> ResourceList<T> {
    pub async fn load<S: ResourceService<T>>(&mut self, service: &S) {
        match service.get_all().await {
            Ok(items) => {
                self.items = items;
                self.error = None;
                self.selected = self.selected.min(self.items.len().saturating_sub(1));
            }
            Err(err) => {
                tracing::warn!("failed to load list: {err}");
                self.items.clear();
                self.selected = 0;
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
            }
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.items.len() - 1);
    }

    pub fn select_prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
    }

    /// Deletes the selected item remotely and, on success, locally.
    /// The caller is expected to have asked for confirmation.
    pub async fn delete_selected<S: ResourceService<T>>(&mut self, service: &S) -> Vec<Effect> {
        let Some(id) = self.selected_item().and_then(|item| item.id()) else {
            return Vec::new();
        };

        match service.delete(id).await {
            Ok(()) => {
                self.items.retain(|item| item.id() != Some(id));
                self.selected = self.selected.min(self.items.len().saturating_sub(1));
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(id, "failed to delete: {err}");
                vec![Effect::alert(DELETE_ERROR_MESSAGE)]
            }
        }
    }
}
