pub mod curve;

pub use curve::{ArchimedeanSpiral, ParamCurve};
