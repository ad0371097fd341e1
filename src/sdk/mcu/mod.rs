pub mod gpio;
pub mod port_group;
pub mod register;

#[cfg(test)]
pub mod fake;
