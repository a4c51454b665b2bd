pub mod case;
pub mod decision;
pub mod distribution;
pub mod member;
pub mod notification;
pub mod session;
pub mod vote;
