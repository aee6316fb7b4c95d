// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

pub mod defs;
pub mod errors;
pub mod table;
