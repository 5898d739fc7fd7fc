pub mod match_act_scoring;
