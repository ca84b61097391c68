//! Boundary with the layer that maps nodes onto concrete visual elements.

use std::cell::RefCell;
use std::error::Error as StdError;
use std::rc::Rc;
use thiserror::Error;
use trellis_core::NodeId;
use trellis_ui_graphics::Size;
use trellis_ui_layout::LayoutData;

/// Outcome of a visual-binding hook.
pub type HookResult = Result<(), Box<dyn StdError>>;

/// Receives structural and layout notifications from a [`StateTree`](crate::StateTree).
///
/// Hook failures never abort a pass: they are logged and forwarded to the
/// handler installed with [`set_callback_error_handler`].
pub trait VisualBinding {
    /// A node's child list changed. `parent` is `None` for the tree root slot.
    fn on_children_changed(
        &self,
        _parent: Option<NodeId>,
        _before: &[NodeId],
        _after: &[NodeId],
    ) -> HookResult {
        Ok(())
    }

    fn on_disposed(&self, _node: NodeId) -> HookResult {
        Ok(())
    }

    /// A layout node finished positioning. `children` holds the placed children only.
    fn on_layout(&self, _node: NodeId, _size: Size, _children: &[LayoutData]) -> HookResult {
        Ok(())
    }
}

/// A visual-binding hook returned an error.
#[derive(Debug, Error)]
#[error("visual binding hook `{hook}` failed for node {node:?}: {source}")]
pub struct CallbackError {
    pub hook: &'static str,
    pub node: Option<NodeId>,
    #[source]
    pub source: Box<dyn StdError>,
}

type ErrorHandler = Rc<dyn Fn(&CallbackError)>;

thread_local! {
    static CALLBACK_ERROR_HANDLER: RefCell<Option<ErrorHandler>> = RefCell::new(None);
}

/// Installs the handler that receives every swallowed hook failure on this thread.
pub fn set_callback_error_handler(handler: impl Fn(&CallbackError) + 'static) {
    CALLBACK_ERROR_HANDLER.with(|slot| *slot.borrow_mut() = Some(Rc::new(handler)));
}

pub fn clear_callback_error_handler() {
    CALLBACK_ERROR_HANDLER.with(|slot| slot.borrow_mut().take());
}

pub(crate) fn report(hook: &'static str, node: Option<NodeId>, result: HookResult) {
    let Err(source) = result else {
        return;
    };
    let error = CallbackError { hook, node, source };
    log::error!("{error}");
    let handler = CALLBACK_ERROR_HANDLER.with(|slot| slot.borrow().clone());
    if let Some(handler) = handler {
        handler(&error);
    }
}
