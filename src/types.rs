use std::cell::RefCell;
use std::rc::Rc;

use crate::interfaces::Bus;
use crate::processor::bus::MainBus;

pub type SharedBus = Rc<RefCell<dyn Bus>>;
pub type SharedMainBus = Rc<RefCell<MainBus>>;
