//! The in-memory collection.

use clap::ValueEnum;
use tracing::debug;

use super::model::{Todo, TodoPayload};

/// How [`TodoStore::create`] picks the id of a new record.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum IdStrategy {
    /// A counter starting above the highest id present at construction and
    /// bumped on every create. Ids are never reused.
    #[default]
    Sequential,
    /// `collection length + 1` at the time of the create. After a delete this
    /// can hand out an id that is still in use; kept for clients that depend
    /// on the exact legacy numbering.
    LengthPlusOne,
}

/// Ordered todo records. Insertion order is preserved; deletes close the gap.
#[derive(Debug)]
pub struct TodoStore {
    todos: Vec<Todo>,
    next_id: i64,
    strategy: IdStrategy,
}

impl TodoStore {
    /// An empty store.
    pub fn new(strategy: IdStrategy) -> Self {
        Self::with_todos(Vec::new(), strategy)
    }

    /// The two records every fresh service starts with.
    pub fn seeded(strategy: IdStrategy) -> Self {
        Self::with_todos(
            vec![Todo::new(1, "Learn Go"), Todo::new(2, "Learn Svelte")],
            strategy,
        )
    }

    pub fn with_todos(todos: Vec<Todo>, strategy: IdStrategy) -> Self {
        let next_id = todos.iter().map(|t| t.id).max().map_or(1, |max| max + 1);
        Self { todos, next_id, strategy }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Appends a record built from `payload`. The payload's `id` is ignored;
    /// its `text` and `done` are kept.
    pub fn create(&mut self, payload: TodoPayload) -> &Todo {
        let id = self.assign_id();
        debug!(id, strategy = ?self.strategy, "todo created");
        self.todos.push(Todo { id, text: payload.text, done: payload.done });
        &self.todos[self.todos.len() - 1]
    }

    fn assign_id(&mut self) -> i64 {
        match self.strategy {
            IdStrategy::Sequential => {
                let id = self.next_id;
                self.next_id += 1;
                id
            }
            IdStrategy::LengthPlusOne => self.todos.len() as i64 + 1,
        }
    }

    /// First record with `id`, in insertion order.
    pub fn get(&self, id: i64) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Replaces the text of the first record with `id`; `id` and `done` are untouched.
    pub fn update_text(&mut self, id: i64, text: String) -> Option<&Todo> {
        let todo = self.todos.iter_mut().find(|t| t.id == id)?;
        todo.text = text;
        debug!(id, "todo text updated");
        Some(&*todo)
    }

    /// Removes every record with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.todos.len();
        self.todos.retain(|t| t.id != id);
        let removed = before - self.todos.len();
        if removed > 0 {
            debug!(id, removed, "todo deleted");
        }
        removed > 0
    }

    /// Sets `done` on the first record with `id`. Idempotent.
    pub fn mark_done(&mut self, id: i64) -> bool {
        match self.todos.iter_mut().find(|t| t.id == id) {
            Some(todo) => {
                todo.done = true;
                debug!(id, "todo marked done");
                true
            }
            None => false,
        }
    }
}
