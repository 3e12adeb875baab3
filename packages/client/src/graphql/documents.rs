/// Owner of a CyberID by name
pub const CYBER_ID_OWNER: &str = "query cyberIdOwner($name: String!) {
  cyberIdByName(name: $name) {
    tokenId
    name
    owner {
      address
    }
  }
}";

/// CyberIDs held by a wallet on a chain
pub const HOLDING_CYBER_IDS: &str = "query holdingCyberIds($address: AddressEVM!, $chainId: ChainId!) {
  wallet(address: $address, chainId: $chainId) {
    cyberIds {
      edges {
        node {
          tokenId
          name
        }
      }
    }
  }
}";
