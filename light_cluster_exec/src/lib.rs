// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

pub mod args;
pub mod logging;
pub mod main_light_cluster;
