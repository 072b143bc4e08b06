use std::{cell::Cell, cmp::min, rc::Rc};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info};
use ratatui::widgets::ListState;

use crate::{
    model::TaskId,
    store::{StoreEvent, TaskListStore},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Focus {
    Input,
    List,
}

pub struct App {
    pub store: TaskListStore,
    pub list_state: ListState,
    pub focus: Focus,
    pub date_format: String,
    pub should_quit: bool,
    dirty: Rc<Cell<bool>>,
}

impl App {
    pub fn new(date_format: impl Into<String>) -> Self {
        App::with_store(TaskListStore::new(), date_format)
    }

    pub fn with_store(mut store: TaskListStore, date_format: impl Into<String>) -> Self {
        // First frame is always drawn.
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        store.subscribe(move |event| {
            flag.set(true);
            match event {
                StoreEvent::TaskAdded(id) => info!("event=task_added id={}", id),
                StoreEvent::TaskToggled { id, completed } => {
                    info!("event=task_toggled id={} completed={}", id, completed)
                }
                StoreEvent::TaskDeleted(id) => info!("event=task_deleted id={}", id),
                StoreEvent::InputChanged => {}
            }
        });

        App {
            store,
            list_state: ListState::default(),
            focus: Focus::Input,
            date_format: date_format.into(),
            should_quit: false,
            dirty,
        }
    }

    /// Returns whether a redraw is due and clears the flag.
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }

    pub fn mark_dirty(&self) {
        self.dirty.set(true);
    }

    pub fn selected_id(&self) -> Option<TaskId> {
        self.list_state
            .selected()
            .and_then(|index| self.store.tasks().get(index))
            .map(|task| task.id)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }
        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::List => self.handle_list_key(key),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => {
                let text = format!("{}{}", self.store.pending_input(), c);
                self.store.set_pending_input(text);
            }
            KeyCode::Backspace => {
                let mut text = self.store.pending_input().to_string();
                if text.pop().is_some() {
                    self.store.set_pending_input(text);
                }
            }
            KeyCode::Enter => {
                self.submit();
            }
            KeyCode::Tab | KeyCode::Down => {
                if self.store.total_count() > 0 {
                    self.focus_list();
                }
            }
            KeyCode::Esc => self.quit(),
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('d') | KeyCode::Char('x') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Tab | KeyCode::Char('i') | KeyCode::Char('a') => self.focus_input(),
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            _ => {}
        }
    }

    pub fn submit(&mut self) {
        if self.store.add().is_none() {
            debug!("event=submit_ignored reason=blank_input");
        }
    }

    fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.store.toggle(id);
            if let Some(task) = self.store.get(id) {
                debug!("event=selection_toggled id={} completed={}", task.id, task.completed);
            }
        }
    }

    fn delete_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        self.store.delete(id);
        match self.store.total_count() {
            0 => self.focus_input(),
            len => {
                let index = self.list_state.selected().unwrap_or(0);
                self.list_state.select(Some(min(index, len - 1)));
            }
        }
    }

    fn focus_list(&mut self) {
        self.focus = Focus::List;
        if self.list_state.selected().is_none() {
            self.list_state.select(Some(0));
        }
        self.mark_dirty();
    }

    fn focus_input(&mut self) {
        self.focus = Focus::Input;
        self.list_state.select(None);
        self.mark_dirty();
    }

    fn move_up(&mut self) {
        match self.list_state.selected() {
            Some(v) => {
                self.list_state.select(Some(v.saturating_sub(1)));
            }
            None => {
                self.list_state.select(Some(0));
            }
        }
        self.mark_dirty();
    }

    fn move_down(&mut self) {
        let len = self.store.total_count();
        if len == 0 {
            return;
        }
        match self.list_state.selected() {
            Some(v) => {
                self.list_state.select(Some(min(v + 1, len - 1)));
            }
            None => {
                self.list_state.select(Some(0));
            }
        }
        self.mark_dirty();
    }

    fn quit(&mut self) {
        debug!("event=quit_requested");
        self.should_quit = true;
    }
}
