// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

use clap::Parser;
use light_cluster_exec::args::Arguments;
use light_cluster_exec::logging::init_log;
use light_cluster_exec::main_light_cluster::main_light_cluster;
use pretty_trace::PrettyTrace;

fn main() {
    PrettyTrace::new().on();
    let args = Arguments::parse();
    init_log(args.verbose);
    if let Err(err) = main_light_cluster(&args) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}
