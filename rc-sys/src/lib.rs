#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(deref_nullptr)]
#![allow(clippy::useless_transmute)]
#![allow(clippy::approx_constant)]

pub use self::bindings::*;

mod bindings {
    include!(concat!(env!("OUT_DIR"), "/bindings.rs"));
}
