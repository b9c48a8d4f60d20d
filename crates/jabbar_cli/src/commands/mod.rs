pub mod report_cmd;
