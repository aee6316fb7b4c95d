// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

pub mod correct;
pub mod doublets;
pub mod linkage;
pub mod majority;
pub mod signature;
