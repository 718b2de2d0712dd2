#![allow(dead_code)]

use ixarray::Ordinal;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Ordinal)]
enum NotAStruct {
    A,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Ordinal)]
struct TwoFields(u8, u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Ordinal)]
struct Generic<X>(X);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Ordinal)]
#[ordinal(maximum = 3)]
struct UnknownOption(u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Ordinal)]
#[ordinal(name = 3)]
struct NameNotAString(u8);

fn main() {}
