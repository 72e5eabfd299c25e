//! Commands: business logic triggered by notifications.
//!
//! A controller never keeps command instances around. It stores a
//! [`CommandFactory`] per notification name and builds a fresh command for
//! every dispatch, so no state leaks from one notification to the next.

use crate::error::HandlerResult;
use crate::patterns::notification::Notification;
use crate::patterns::notifier::{Notifier, Notify};
use std::collections::VecDeque;
use std::sync::Arc;

/// A unit of work run in response to a notification.
pub trait Command: Notify + Send {
    fn execute(&mut self, notification: &Notification) -> HandlerResult;
}

/// Produces a new command instance per call.
pub type CommandFactory = Arc<dyn Fn() -> Box<dyn Command> + Send + Sync>;

/// Wrap a constructor closure as a [`CommandFactory`].
pub fn factory<C, F>(build: F) -> CommandFactory
where
    C: Command + 'static,
    F: Fn() -> C + Send + Sync + 'static,
{
    Arc::new(move || Box::new(build()) as Box<dyn Command>)
}

type SimpleFn = Arc<dyn Fn(&Notifier, &Notification) -> HandlerResult + Send + Sync>;

/// A command backed by a closure.
///
/// The closure receives the command's notifier so it can reach the facade
/// once the controller has bound it to a core.
pub struct SimpleCommand {
    notifier: Notifier,
    run: SimpleFn,
}

impl SimpleCommand {
    pub fn new<F>(run: F) -> Self
    where
        F: Fn(&Notifier, &Notification) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            notifier: Notifier::new(),
            run: Arc::new(run),
        }
    }

    /// A factory building a fresh `SimpleCommand` around the same closure.
    pub fn factory<F>(run: F) -> CommandFactory
    where
        F: Fn(&Notifier, &Notification) -> HandlerResult + Send + Sync + 'static,
    {
        let run: SimpleFn = Arc::new(run);
        Arc::new(move || {
            Box::new(SimpleCommand {
                notifier: Notifier::new(),
                run: run.clone(),
            }) as Box<dyn Command>
        })
    }
}

impl Notify for SimpleCommand {
    fn notifier(&self) -> &Notifier {
        &self.notifier
    }
}

impl Command for SimpleCommand {
    fn execute(&mut self, notification: &Notification) -> HandlerResult {
        (self.run)(&self.notifier, notification)
    }
}

type PopulateFn = Arc<dyn Fn(&mut MacroCommand) + Send + Sync>;

/// A command that runs a FIFO queue of sub-commands.
///
/// The `populate` hook fills the queue immediately before every execution,
/// and execution drains it completely, so one instance can be executed
/// repeatedly without carrying sub-commands over. Each sub-command is built
/// fresh, bound to the macro's core and given the same notification.
pub struct MacroCommand {
    notifier: Notifier,
    populate: PopulateFn,
    sub_commands: VecDeque<CommandFactory>,
}

impl MacroCommand {
    pub fn new<F>(populate: F) -> Self
    where
        F: Fn(&mut MacroCommand) + Send + Sync + 'static,
    {
        Self {
            notifier: Notifier::new(),
            populate: Arc::new(populate),
            sub_commands: VecDeque::new(),
        }
    }

    /// A factory building a fresh `MacroCommand` around the same hook.
    pub fn factory<F>(populate: F) -> CommandFactory
    where
        F: Fn(&mut MacroCommand) + Send + Sync + 'static,
    {
        let populate: PopulateFn = Arc::new(populate);
        Arc::new(move || {
            Box::new(MacroCommand {
                notifier: Notifier::new(),
                populate: populate.clone(),
                sub_commands: VecDeque::new(),
            }) as Box<dyn Command>
        })
    }

    /// Queue a sub-command; sub-commands run in the order they were added.
    pub fn add_sub_command(&mut self, factory: CommandFactory) {
        self.sub_commands.push_back(factory);
    }

    /// Sub-commands still waiting to run.
    pub fn pending(&self) -> usize {
        self.sub_commands.len()
    }
}

impl Notify for MacroCommand {
    fn notifier(&self) -> &Notifier {
        &self.notifier
    }
}

impl Command for MacroCommand {
    fn execute(&mut self, notification: &Notification) -> HandlerResult {
        let populate = self.populate.clone();
        populate(self);

        while let Some(factory) = self.sub_commands.pop_front() {
            let mut command = factory();
            self.notifier.share_binding(command.notifier());
            if let Err(e) = command.execute(notification) {
                self.sub_commands.clear();
                return Err(e);
            }
        }
        Ok(())
    }
}
