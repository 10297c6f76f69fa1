//! Synthetic Traffic Samples
//!
//! Fixed battery used by the smoke test and `--sample`. One entry per
//! traffic family; each table names every feature of the layout.

use crate::error::ThreatResult;
use crate::features::FeatureVector;

#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub name: &'static str,
    pub features: &'static [(&'static str, f64)],
}

impl Sample {
    pub fn to_vector(&self) -> ThreatResult<FeatureVector> {
        FeatureVector::from_named(self.features.iter().copied())
    }
}

/// Look up a sample by name, ignoring case
pub fn find(name: &str) -> Option<&'static Sample> {
    SAMPLES.iter().find(|s| s.name.eq_ignore_ascii_case(name))
}

pub static SAMPLES: &[Sample] = &[
    Sample { name: "Benign", features: BENIGN },
    Sample { name: "DDoS", features: DDOS },
    Sample { name: "Port_Scan", features: PORT_SCAN },
    Sample { name: "Malware", features: MALWARE },
    Sample { name: "Spoofing", features: SPOOFING },
    Sample { name: "MQTT", features: MQTT },
    Sample { name: "Recon", features: RECON },
];

const BENIGN: &[(&str, f64)] = &[
    ("Header_Length", 20.0), ("Protocol_Type", 6.0), ("Duration", 0.5),
    ("Rate", 1000.0), ("Srate", 500.0), ("Drate", 500.0),
    ("fin_flag_number", 1.0), ("syn_flag_number", 1.0), ("rst_flag_number", 0.0),
    ("psh_flag_number", 1.0), ("ack_flag_number", 1.0), ("ece_flag_number", 0.0),
    ("cwr_flag_number", 0.0),
    ("ack_count", 10.0), ("syn_count", 1.0), ("fin_count", 1.0), ("rst_count", 0.0),
    ("HTTP", 1.0), ("HTTPS", 0.0), ("DNS", 0.0), ("Telnet", 0.0), ("SMTP", 0.0),
    ("SSH", 0.0), ("IRC", 0.0),
    ("TCP", 1.0), ("UDP", 0.0), ("DHCP", 0.0), ("ARP", 0.0), ("ICMP", 0.0),
    ("IGMP", 0.0), ("IPv", 1.0), ("LLC", 0.0),
    ("Tot_sum", 1500.0), ("Min", 64.0), ("Max", 1500.0), ("AVG", 750.0),
    ("Std", 200.0), ("Tot_size", 3000.0), ("IAT", 0.1),
    ("Number", 20.0), ("Magnitude", 1.5), ("Radius", 0.8), ("Covariance", 0.3),
    ("Variance", 0.4), ("Weight", 1.0),
];

const DDOS: &[(&str, f64)] = &[
    ("Header_Length", 20.0), ("Protocol_Type", 17.0), ("Duration", 0.0005),
    ("Rate", 80000.0), ("Srate", 40000.0), ("Drate", 40000.0),
    ("fin_flag_number", 0.0), ("syn_flag_number", 1.0), ("rst_flag_number", 0.0),
    ("psh_flag_number", 0.0), ("ack_flag_number", 0.0), ("ece_flag_number", 0.0),
    ("cwr_flag_number", 0.0),
    ("ack_count", 0.0), ("syn_count", 1000.0), ("fin_count", 0.0), ("rst_count", 0.0),
    ("HTTP", 0.0), ("HTTPS", 0.0), ("DNS", 0.0), ("Telnet", 0.0), ("SMTP", 0.0),
    ("SSH", 0.0), ("IRC", 0.0),
    ("TCP", 0.0), ("UDP", 1.0), ("DHCP", 0.0), ("ARP", 0.0), ("ICMP", 0.0),
    ("IGMP", 0.0), ("IPv", 1.0), ("LLC", 0.0),
    ("Tot_sum", 64000.0), ("Min", 64.0), ("Max", 64.0), ("AVG", 64.0),
    ("Std", 0.0), ("Tot_size", 64000.0), ("IAT", 0.00001),
    ("Number", 10000.0), ("Magnitude", 10.0), ("Radius", 5.0), ("Covariance", 0.9),
    ("Variance", 0.95), ("Weight", 5.0),
];

const PORT_SCAN: &[(&str, f64)] = &[
    ("Header_Length", 20.0), ("Protocol_Type", 6.0), ("Duration", 0.01),
    ("Rate", 12000.0), ("Srate", 6000.0), ("Drate", 6000.0),
    ("fin_flag_number", 1.0), ("syn_flag_number", 1.0), ("rst_flag_number", 1.0),
    ("psh_flag_number", 0.0), ("ack_flag_number", 0.0), ("ece_flag_number", 0.0),
    ("cwr_flag_number", 0.0),
    ("ack_count", 0.0), ("syn_count", 300.0), ("fin_count", 0.0), ("rst_count", 150.0),
    ("HTTP", 0.0), ("HTTPS", 0.0), ("DNS", 0.0), ("Telnet", 1.0), ("SMTP", 0.0),
    ("SSH", 1.0), ("IRC", 0.0),
    ("TCP", 1.0), ("UDP", 0.0), ("DHCP", 0.0), ("ARP", 0.0), ("ICMP", 0.0),
    ("IGMP", 0.0), ("IPv", 1.0), ("LLC", 0.0),
    ("Tot_sum", 6400.0), ("Min", 64.0), ("Max", 64.0), ("AVG", 64.0),
    ("Std", 0.0), ("Tot_size", 6400.0), ("IAT", 0.0001),
    ("Number", 100.0), ("Magnitude", 3.0), ("Radius", 2.0), ("Covariance", 0.7),
    ("Variance", 0.8), ("Weight", 3.0),
];

const MALWARE: &[(&str, f64)] = &[
    ("Header_Length", 20.0), ("Protocol_Type", 6.0), ("Duration", 30.0),
    ("Rate", 200.0), ("Srate", 100.0), ("Drate", 100.0),
    ("fin_flag_number", 1.0), ("syn_flag_number", 1.0), ("rst_flag_number", 0.0),
    ("psh_flag_number", 1.0), ("ack_flag_number", 1.0), ("ece_flag_number", 0.0),
    ("cwr_flag_number", 0.0),
    ("ack_count", 50.0), ("syn_count", 1.0), ("fin_count", 1.0), ("rst_count", 0.0),
    ("HTTP", 0.0), ("HTTPS", 1.0), ("DNS", 0.0), ("Telnet", 0.0), ("SMTP", 0.0),
    ("SSH", 0.0), ("IRC", 0.0),
    ("TCP", 1.0), ("UDP", 0.0), ("DHCP", 0.0), ("ARP", 0.0), ("ICMP", 0.0),
    ("IGMP", 0.0), ("IPv", 1.0), ("LLC", 0.0),
    ("Tot_sum", 5000.0), ("Min", 100.0), ("Max", 100.0), ("AVG", 100.0),
    ("Std", 0.0), ("Tot_size", 5000.0), ("IAT", 0.05),
    ("Number", 50.0), ("Magnitude", 2.0), ("Radius", 1.2), ("Covariance", 0.6),
    ("Variance", 0.7), ("Weight", 2.0),
];

const SPOOFING: &[(&str, f64)] = &[
    ("Header_Length", 60.0), ("Protocol_Type", 1.0), ("Duration", 0.2),
    ("Rate", 3000.0), ("Srate", 1500.0), ("Drate", 1500.0),
    ("fin_flag_number", 0.0), ("syn_flag_number", 0.0), ("rst_flag_number", 0.0),
    ("psh_flag_number", 0.0), ("ack_flag_number", 0.0), ("ece_flag_number", 0.0),
    ("cwr_flag_number", 0.0),
    ("ack_count", 5.0), ("syn_count", 2.0), ("fin_count", 0.0), ("rst_count", 0.0),
    ("HTTP", 0.0), ("HTTPS", 0.0), ("DNS", 1.0), ("Telnet", 0.0), ("SMTP", 0.0),
    ("SSH", 0.0), ("IRC", 0.0),
    ("TCP", 0.0), ("UDP", 0.0), ("DHCP", 0.0), ("ARP", 1.0), ("ICMP", 0.0),
    ("IGMP", 0.0), ("IPv", 1.0), ("LLC", 0.0),
    ("Tot_sum", 2000.0), ("Min", 60.0), ("Max", 2000.0), ("AVG", 1030.0),
    ("Std", 80.0), ("Tot_size", 4000.0), ("IAT", 0.005),
    ("Number", 30.0), ("Magnitude", 1.2), ("Radius", 0.5), ("Covariance", 0.2),
    ("Variance", 0.3), ("Weight", 1.1),
];

const MQTT: &[(&str, f64)] = &[
    ("Header_Length", 30.0), ("Protocol_Type", 6.0), ("Duration", 2.0),
    ("Rate", 800.0), ("Srate", 400.0), ("Drate", 400.0),
    ("fin_flag_number", 0.0), ("syn_flag_number", 0.0), ("rst_flag_number", 0.0),
    ("psh_flag_number", 0.0), ("ack_flag_number", 1.0), ("ece_flag_number", 0.0),
    ("cwr_flag_number", 0.0),
    ("ack_count", 20.0), ("syn_count", 1.0), ("fin_count", 0.0), ("rst_count", 0.0),
    ("HTTP", 0.0), ("HTTPS", 0.0), ("DNS", 0.0), ("Telnet", 0.0), ("SMTP", 0.0),
    ("SSH", 0.0), ("IRC", 0.0),
    ("TCP", 1.0), ("UDP", 0.0), ("DHCP", 0.0), ("ARP", 0.0), ("ICMP", 0.0),
    ("IGMP", 0.0), ("IPv", 1.0), ("LLC", 0.0),
    ("Tot_sum", 3200.0), ("Min", 60.0), ("Max", 120.0), ("AVG", 90.0),
    ("Std", 10.0), ("Tot_size", 6400.0), ("IAT", 0.02),
    ("Number", 40.0), ("Magnitude", 0.8), ("Radius", 0.3), ("Covariance", 0.1),
    ("Variance", 0.2), ("Weight", 1.5),
];

const RECON: &[(&str, f64)] = &[
    ("Header_Length", 18.0), ("Protocol_Type", 6.0), ("Duration", 0.05),
    ("Rate", 4000.0), ("Srate", 2000.0), ("Drate", 2000.0),
    ("fin_flag_number", 1.0), ("syn_flag_number", 1.0), ("rst_flag_number", 0.0),
    ("psh_flag_number", 0.0), ("ack_flag_number", 0.0), ("ece_flag_number", 0.0),
    ("cwr_flag_number", 0.0),
    ("ack_count", 0.0), ("syn_count", 80.0), ("fin_count", 0.0), ("rst_count", 60.0),
    ("HTTP", 0.0), ("HTTPS", 0.0), ("DNS", 0.0), ("Telnet", 0.0), ("SMTP", 0.0),
    ("SSH", 0.0), ("IRC", 0.0),
    ("TCP", 1.0), ("UDP", 0.0), ("DHCP", 0.0), ("ARP", 0.0), ("ICMP", 0.0),
    ("IGMP", 0.0), ("IPv", 1.0), ("LLC", 0.0),
    ("Tot_sum", 4000.0), ("Min", 64.0), ("Max", 512.0), ("AVG", 288.0),
    ("Std", 60.0), ("Tot_size", 4000.0), ("IAT", 0.0005),
    ("Number", 200.0), ("Magnitude", 4.0), ("Radius", 2.5), ("Covariance", 0.6),
    ("Variance", 0.9), ("Weight", 2.0),
];
