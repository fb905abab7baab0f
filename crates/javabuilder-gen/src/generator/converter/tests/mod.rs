mod convert;
mod naming;
