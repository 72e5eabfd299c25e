//! Building blocks collaborators are made of.

pub mod command;
pub mod facade;
pub mod mediator;
pub mod notification;
pub mod notifier;
pub mod observer;
pub mod proxy;
