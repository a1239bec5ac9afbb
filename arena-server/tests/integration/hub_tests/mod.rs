mod test_hosted_peers_converge;
